//! Global network parameters feeding the payout estimate

use crate::asset::Asset;
use crate::constants::FALLBACK_QUOTE;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of the `post` reward fund
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardFund {
    pub reward_balance: Asset,
    pub recent_claims: Decimal,
}

/// Everything the calculator needs besides the post itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalParameters {
    pub reward_fund: RewardFund,
    /// Median history price, base side (SBD per STEEM)
    pub base_price: Asset,
    /// USD price of one SBD
    pub quote_price: Decimal,
}

impl GlobalParameters {
    pub fn new(reward_fund: RewardFund, base_price: Asset) -> Self {
        Self {
            reward_fund,
            base_price,
            quote_price: FALLBACK_QUOTE,
        }
    }

    pub fn with_quote(mut self, quote_price: Decimal) -> Self {
        self.quote_price = quote_price;
        self
    }
}
