//! Steem post payout economics
//!
//! Implements the estimate of what a post will pay out at cashout:
//! - Asset amounts as published by the chain
//! - Global reward parameters (reward fund, median price, USD quote)
//! - Per-vote payout and curation reward calculations
//! - Author / curator / beneficiary split

pub mod asset;
pub mod error;
pub mod params;
pub mod rewards;

pub use asset::Asset;
pub use error::{Result, RewardError};
pub use params::{GlobalParameters, RewardFund};
pub use rewards::{
    curation_weight, Beneficiary, PayoutResult, PostRewardInput, RewardCalculator, Vote,
};

/// Economic constants
pub mod constants {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Seconds after post creation at which a vote earns the full curation share (30 minutes)
    pub const CURATION_WINDOW_SECONDS: i64 = 1800;

    /// Upper bound of the curation weight (percent)
    pub const MAX_CURATION_WEIGHT: Decimal = dec!(100);

    /// Divisor applied to `rshares * weight`; 100 / 400 caps curation at 25% of a vote
    pub const CURATION_DIVISOR: Decimal = dec!(400);

    /// Beneficiary weights are expressed in basis points (10000 = 100%)
    pub const BENEFICIARY_WEIGHT_PER_PERCENT: Decimal = dec!(100);

    /// Decimal places of every reported amount
    pub const PAYOUT_DECIMALS: u32 = 2;

    /// Quote used when no USD price is available
    pub const FALLBACK_QUOTE: Decimal = dec!(1);
}

#[cfg(test)]
mod tests {
    use super::constants::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_curation_cap_is_quarter() {
        assert_eq!(MAX_CURATION_WEIGHT / CURATION_DIVISOR, dec!(0.25));
        assert_eq!(CURATION_WINDOW_SECONDS, 30 * 60);
    }
}
