//! Daemon configuration (TOML)

use anyhow::Context;
use payout_core::CacheTtls;
use payout_network::{DEFAULT_NODE, DEFAULT_TICKER_URL};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub ticker: TickerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

/// Steem node connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_node")]
    pub node: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// USD ticker for SBD. Disabled = every USD amount uses a quote of 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_ticker_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Shared by reward balance and recent claims
    #[serde(default = "default_reward_fund_ttl")]
    pub reward_fund_ttl_secs: u64,
    #[serde(default = "default_base_price_ttl")]
    pub base_price_ttl_secs: u64,
    #[serde(default = "default_quote_ttl")]
    pub quote_ttl_secs: u64,
    /// Fallback quote lifetime after a ticker failure
    #[serde(default = "default_quote_failure_ttl")]
    pub quote_failure_ttl_secs: u64,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}

fn default_node() -> String {
    DEFAULT_NODE.to_string()
}

fn default_ticker_url() -> String {
    DEFAULT_TICKER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_true() -> bool {
    true
}

fn default_reward_fund_ttl() -> u64 {
    300
}

fn default_base_price_ttl() -> u64 {
    150
}

fn default_quote_ttl() -> u64 {
    300
}

fn default_quote_failure_ttl() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            node: default_node(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_ticker_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            reward_fund_ttl_secs: default_reward_fund_ttl(),
            base_price_ttl_secs: default_base_price_ttl(),
            quote_ttl_secs: default_quote_ttl(),
            quote_failure_ttl_secs: default_quote_failure_ttl(),
        }
    }
}

impl ChainConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl TickerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CacheConfig {
    pub fn ttls(&self) -> CacheTtls {
        CacheTtls {
            reward_fund: Duration::from_secs(self.reward_fund_ttl_secs),
            base_price: Duration::from_secs(self.base_price_ttl_secs),
            quote: Duration::from_secs(self.quote_ttl_secs),
            quote_failure: Duration::from_secs(self.quote_failure_ttl_secs),
        }
    }
}

impl Config {
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        toml::from_str(contents).context("invalid configuration")
    }

    /// A missing file yields the defaults; a malformed one is an error
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::warn!("Config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("parsing {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind.port(), 5000);
        assert_eq!(config.chain.node, DEFAULT_NODE);
        assert!(config.ticker.enabled);
        assert_eq!(config.cache.ttls(), CacheTtls::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [chain]
            node = "https://rpc.buildteam.io"

            [cache]
            reward_fund_ttl_secs = 150
            "#,
        )
        .unwrap();

        assert_eq!(config.chain.node, "https://rpc.buildteam.io");
        assert_eq!(config.chain.timeout(), Duration::from_secs(5));
        assert_eq!(config.cache.ttls().reward_fund, Duration::from_secs(150));
        assert_eq!(config.cache.ttls().base_price, Duration::from_secs(150));
        assert_eq!(config.ticker.url, DEFAULT_TICKER_URL);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind = \"0.0.0.0:8080\"\n[ticker]\nenabled = false").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.bind.port(), 8080);
        assert!(!config.ticker.enabled);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load(Path::new("/nonexistent/estimator.toml")).unwrap();
        assert_eq!(config.server.bind, default_bind());
    }

    #[test]
    fn test_malformed_file_is_error() {
        assert!(Config::from_toml("[server]\nbind = 42").is_err());
    }
}
