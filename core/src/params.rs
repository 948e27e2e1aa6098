//! Cache-first access to the global reward parameters
//!
//! The reward fund and median price move slowly, so every estimate reads them
//! through the cache and only goes to the chain on a miss. The USD quote is
//! cosmetic: when it cannot be fetched the estimate proceeds with a quote of 1,
//! and that fallback is cached for a short while before the ticker is retried.

use crate::cache::CacheStore;
use crate::error::Result;
use crate::source::{ChainSource, QuoteSource};
use payout_economics::constants::FALLBACK_QUOTE;
use payout_economics::{Asset, GlobalParameters, RewardError, RewardFund};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

pub const REWARD_BALANCE_KEY: &str = "reward_balance";
pub const RECENT_CLAIMS_KEY: &str = "recent_claims";
pub const BASE_PRICE_KEY: &str = "base_price";
pub const SBD_PRICE_KEY: &str = "sbd_price";

/// Freshness windows per cached value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    /// Shared by `reward_balance` and `recent_claims`
    pub reward_fund: Duration,
    pub base_price: Duration,
    pub quote: Duration,
    /// How long the fallback quote stands in after a ticker failure
    pub quote_failure: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            reward_fund: Duration::from_secs(300),
            base_price: Duration::from_secs(150),
            quote: Duration::from_secs(300),
            quote_failure: Duration::from_secs(60),
        }
    }
}

#[derive(Clone)]
pub struct ParameterCache {
    store: Arc<dyn CacheStore>,
    chain: Arc<dyn ChainSource>,
    quotes: Option<Arc<dyn QuoteSource>>,
    ttls: CacheTtls,
}

impl ParameterCache {
    pub fn new(store: Arc<dyn CacheStore>, chain: Arc<dyn ChainSource>, ttls: CacheTtls) -> Self {
        Self {
            store,
            chain,
            quotes: None,
            ttls,
        }
    }

    /// Enable USD conversion through an external ticker
    pub fn with_quote_source(mut self, quotes: Arc<dyn QuoteSource>) -> Self {
        self.quotes = Some(quotes);
        self
    }

    pub async fn reward_fund(&self) -> Result<RewardFund> {
        let balance = self.store.get(REWARD_BALANCE_KEY).await?;
        let claims = self.store.get(RECENT_CLAIMS_KEY).await?;

        if let (Some(balance), Some(claims)) = (balance, claims) {
            match decode_reward_fund(&balance, &claims) {
                Ok(fund) => {
                    tracing::trace!(reward_balance = %fund.reward_balance, "reward fund cache hit");
                    return Ok(fund);
                }
                Err(e) => tracing::warn!("Discarding cached reward fund: {}", e),
            }
        }

        let fund = self.chain.reward_fund().await?;
        if fund.recent_claims.is_zero() {
            return Err(RewardError::ZeroRecentClaims.into());
        }

        let ttl = self.ttls.reward_fund;
        self.store
            .set(REWARD_BALANCE_KEY, fund.reward_balance.to_string(), ttl)
            .await?;
        self.store
            .set(RECENT_CLAIMS_KEY, fund.recent_claims.to_string(), ttl)
            .await?;

        tracing::debug!(
            reward_balance = %fund.reward_balance,
            recent_claims = %fund.recent_claims,
            "reward fund refreshed"
        );
        Ok(fund)
    }

    pub async fn base_price(&self) -> Result<Asset> {
        if let Some(cached) = self.store.get(BASE_PRICE_KEY).await? {
            match cached.parse::<Asset>() {
                Ok(price) => return Ok(price),
                Err(e) => tracing::warn!("Discarding cached base price: {}", e),
            }
        }

        let price = self.chain.median_price().await?;
        self.store
            .set(BASE_PRICE_KEY, price.to_string(), self.ttls.base_price)
            .await?;

        tracing::debug!(base_price = %price, "median price refreshed");
        Ok(price)
    }

    /// USD price of SBD; never fails
    pub async fn quote_price(&self) -> Decimal {
        let Some(quotes) = &self.quotes else {
            return FALLBACK_QUOTE;
        };

        match self.store.get(SBD_PRICE_KEY).await {
            Ok(Some(cached)) => match Decimal::from_str(&cached) {
                Ok(price) => return price,
                Err(_) => tracing::warn!("Discarding cached SBD price {:?}", cached),
            },
            Ok(None) => {}
            Err(e) => tracing::warn!("SBD price cache unavailable: {}", e),
        }

        match quotes.usd_price().await {
            Ok(price) => {
                if let Err(e) = self
                    .store
                    .set(SBD_PRICE_KEY, price.to_string(), self.ttls.quote)
                    .await
                {
                    tracing::warn!("Could not cache SBD price: {}", e);
                }
                price
            }
            Err(e) => {
                tracing::warn!("⚠️  SBD price unavailable, using {}: {}", FALLBACK_QUOTE, e);
                if let Err(e) = self
                    .store
                    .set(
                        SBD_PRICE_KEY,
                        FALLBACK_QUOTE.to_string(),
                        self.ttls.quote_failure,
                    )
                    .await
                {
                    tracing::warn!("Could not cache fallback SBD price: {}", e);
                }
                FALLBACK_QUOTE
            }
        }
    }

    /// Everything a [`payout_economics::RewardCalculator`] needs
    pub async fn snapshot(&self) -> Result<GlobalParameters> {
        let reward_fund = self.reward_fund().await?;
        let base_price = self.base_price().await?;
        let quote = self.quote_price().await;

        Ok(GlobalParameters::new(reward_fund, base_price).with_quote(quote))
    }
}

fn decode_reward_fund(balance: &str, claims: &str) -> std::result::Result<RewardFund, RewardError> {
    let reward_balance = balance.parse::<Asset>()?;
    let recent_claims = Decimal::from_str(claims)
        .map_err(|_| RewardError::InvalidAsset(format!("recent claims {:?}", claims)))?;

    if recent_claims.is_zero() {
        return Err(RewardError::ZeroRecentClaims);
    }

    Ok(RewardFund {
        reward_balance,
        recent_claims,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::error::{CacheError, CoreError, SourceError};
    use crate::post::{Post, PostIdentifier};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingChain {
        fund_calls: AtomicUsize,
        price_calls: AtomicUsize,
        zero_claims: bool,
    }

    #[async_trait]
    impl ChainSource for CountingChain {
        async fn reward_fund(&self) -> std::result::Result<RewardFund, SourceError> {
            self.fund_calls.fetch_add(1, Ordering::SeqCst);
            Ok(RewardFund {
                reward_balance: "1000.000 STEEM".parse().unwrap(),
                recent_claims: if self.zero_claims {
                    Decimal::ZERO
                } else {
                    dec!(1000000000000)
                },
            })
        }

        async fn median_price(&self) -> std::result::Result<Asset, SourceError> {
            self.price_calls.fetch_add(1, Ordering::SeqCst);
            Ok("0.250 SBD".parse().unwrap())
        }

        async fn post(&self, id: &PostIdentifier) -> std::result::Result<Post, SourceError> {
            Err(SourceError::PostNotFound(id.to_string()))
        }
    }

    struct FixedQuote {
        price: Option<Decimal>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl QuoteSource for FixedQuote {
        async fn usd_price(&self) -> std::result::Result<Decimal, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.price
                .ok_or_else(|| SourceError::Transport("ticker down".to_string()))
        }
    }

    struct BrokenStore;

    #[async_trait]
    impl CacheStore for BrokenStore {
        async fn get(&self, _key: &str) -> std::result::Result<Option<String>, CacheError> {
            Err(CacheError("connection refused".to_string()))
        }

        async fn set(
            &self,
            _key: &str,
            _value: String,
            _ttl: Duration,
        ) -> std::result::Result<(), CacheError> {
            Err(CacheError("connection refused".to_string()))
        }
    }

    fn setup() -> (Arc<MemoryCache>, Arc<CountingChain>, ParameterCache) {
        let store = Arc::new(MemoryCache::new());
        let chain = Arc::new(CountingChain::default());
        let params = ParameterCache::new(store.clone(), chain.clone(), CacheTtls::default());
        (store, chain, params)
    }

    #[tokio::test(start_paused = true)]
    async fn test_reward_fund_cached_until_ttl() {
        let (_store, chain, params) = setup();

        let first = params.reward_fund().await.unwrap();
        let second = params.reward_fund().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(chain.fund_calls.load(Ordering::SeqCst), 1);

        tokio::time::advance(Duration::from_secs(300)).await;
        params.reward_fund().await.unwrap();
        assert_eq!(chain.fund_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_claims_refetches_both() {
        let (store, chain, params) = setup();
        store
            .set(
                REWARD_BALANCE_KEY,
                "5.000 STEEM".to_string(),
                Duration::from_secs(300),
            )
            .await
            .unwrap();

        let fund = params.reward_fund().await.unwrap();
        assert_eq!(fund.reward_balance.amount, dec!(1000));
        assert_eq!(chain.fund_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            store.get(RECENT_CLAIMS_KEY).await.unwrap().as_deref(),
            Some("1000000000000")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_base_price_has_shorter_ttl() {
        let (_store, chain, params) = setup();

        params.snapshot().await.unwrap();
        tokio::time::advance(Duration::from_secs(150)).await;
        params.snapshot().await.unwrap();

        assert_eq!(chain.price_calls.load(Ordering::SeqCst), 2);
        assert_eq!(chain.fund_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_corrupt_cache_entry_is_refetched() {
        let (store, chain, params) = setup();
        store
            .set(BASE_PRICE_KEY, "garbage".to_string(), Duration::from_secs(150))
            .await
            .unwrap();

        let price = params.base_price().await.unwrap();
        assert_eq!(price.amount, dec!(0.25));
        assert_eq!(chain.price_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_claims_fail_fast_and_are_not_cached() {
        let store = Arc::new(MemoryCache::new());
        let chain = Arc::new(CountingChain {
            zero_claims: true,
            ..Default::default()
        });
        let params = ParameterCache::new(store.clone(), chain, CacheTtls::default());

        let err = params.reward_fund().await.unwrap_err();
        assert!(matches!(err, CoreError::Reward(RewardError::ZeroRecentClaims)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_quote_defaults_without_ticker() {
        let (_store, _chain, params) = setup();
        assert_eq!(params.quote_price().await, dec!(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quote_cached_on_success() {
        let (store, _chain, params) = setup();
        let ticker = Arc::new(FixedQuote {
            price: Some(dec!(3.41)),
            calls: AtomicUsize::new(0),
        });
        let params = params.with_quote_source(ticker.clone());

        assert_eq!(params.quote_price().await, dec!(3.41));
        assert_eq!(params.quote_price().await, dec!(3.41));
        assert_eq!(ticker.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.get(SBD_PRICE_KEY).await.unwrap().as_deref(), Some("3.41"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quote_failure_held_for_short_ttl() {
        let (store, _chain, params) = setup();
        let ticker = Arc::new(FixedQuote {
            price: None,
            calls: AtomicUsize::new(0),
        });
        let params = params.with_quote_source(ticker.clone());

        assert_eq!(params.quote_price().await, dec!(1));
        assert_eq!(params.quote_price().await, dec!(1));
        assert_eq!(ticker.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.get(SBD_PRICE_KEY).await.unwrap().as_deref(), Some("1"));

        tokio::time::advance(CacheTtls::default().quote_failure).await;
        assert_eq!(params.quote_price().await, dec!(1));
        assert_eq!(ticker.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_store_failure_propagates_for_core_values() {
        let chain = Arc::new(CountingChain::default());
        let ticker = Arc::new(FixedQuote {
            price: Some(dec!(2)),
            calls: AtomicUsize::new(0),
        });
        let params = ParameterCache::new(Arc::new(BrokenStore), chain, CacheTtls::default())
            .with_quote_source(ticker);

        assert!(matches!(
            params.reward_fund().await.unwrap_err(),
            CoreError::Cache(_)
        ));
        // The quote still resolves straight from the ticker
        assert_eq!(params.quote_price().await, dec!(2));
    }
}
