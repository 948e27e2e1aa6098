mod config;

use anyhow::Context;
use clap::Parser;
use config::Config;
use owo_colors::OwoColorize;
use payout_api::ApiState;
use payout_core::{MemoryCache, ParameterCache};
use payout_network::{SteemClient, TickerClient};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing_subscriber::EnvFilter;

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "payout-estimator")]
#[command(about = "Steem post payout estimator")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config/estimator.toml")]
    config: PathBuf,

    /// Listen address, overrides [server] bind
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// Steem node URL, overrides [chain] node
    #[arg(long, value_name = "URL")]
    node: Option<String>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, value_name = "FILTER", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if let Some(node) = &self.node {
            config.chain.node = node.clone();
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_banner(config: &Config) {
    println!("{}", "Steem Payout Estimator".cyan().bold());
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
    println!("{}: {}", "Node".yellow().bold(), config.chain.node);
    if config.ticker.enabled {
        println!("{}: {}", "Ticker".yellow().bold(), config.ticker.url);
    } else {
        println!("{}: {}", "Ticker".yellow().bold(), "disabled (USD = SBD)".bright_black());
    }
    println!(
        "{}: fund {}s, price {}s, quote {}s",
        "Cache TTLs".yellow().bold(),
        config.cache.reward_fund_ttl_secs,
        config.cache.base_price_ttl_secs,
        config.cache.quote_ttl_secs
    );
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut config = Config::load(&cli.config)?;
    cli.apply_overrides(&mut config);
    print_banner(&config);

    let chain = Arc::new(
        SteemClient::new(config.chain.node.clone(), config.chain.timeout())
            .context("building Steem node client")?,
    );
    let store = Arc::new(MemoryCache::new());

    let mut params = ParameterCache::new(store.clone(), chain.clone(), config.cache.ttls());
    if config.ticker.enabled {
        let ticker = TickerClient::new(config.ticker.url.clone(), config.ticker.timeout())
            .context("building ticker client")?;
        params = params.with_quote_source(Arc::new(ticker));
    }

    // Expired entries are otherwise only dropped when read again
    tokio::spawn(async move {
        let mut interval = time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = store.purge_expired();
            if purged > 0 {
                tracing::debug!("Purged {} expired cache entries", purged);
            }
        }
    });

    payout_api::start_server(config.server.bind, ApiState::new(chain, params))
        .await
        .with_context(|| format!("serving on {}", config.server.bind))?;

    Ok(())
}
