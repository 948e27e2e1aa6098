//! External data sources the estimator depends on

use crate::error::SourceError;
use crate::post::{Post, PostIdentifier};
use async_trait::async_trait;
use payout_economics::{Asset, RewardFund};
use rust_decimal::Decimal;

/// Read access to the blockchain
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Current `post` reward fund
    async fn reward_fund(&self) -> Result<RewardFund, SourceError>;

    /// Base side of the current median history price
    async fn median_price(&self) -> Result<Asset, SourceError>;

    /// Fails with [`SourceError::PostNotFound`] when the post does not exist
    async fn post(&self, id: &PostIdentifier) -> Result<Post, SourceError>;
}

/// USD price of the debt token (SBD)
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn usd_price(&self) -> Result<Decimal, SourceError>;
}
