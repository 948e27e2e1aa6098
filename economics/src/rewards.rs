//! Post payout calculation
//!
//! Every vote contributes `rshares * fund_per_share * base_price` to the post.
//! Curators receive up to a quarter of their vote's payout, scaled linearly by
//! how long after creation they voted (full share after 30 minutes). The rest
//! goes to the author, minus whatever the post routes to beneficiaries.

use crate::constants::{
    BENEFICIARY_WEIGHT_PER_PERCENT, CURATION_DIVISOR, CURATION_WINDOW_SECONDS,
    MAX_CURATION_WEIGHT, PAYOUT_DECIMALS,
};
use crate::error::{Result, RewardError};
use crate::params::GlobalParameters;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A single active vote on a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub voter: String,
    /// Signed; downvotes are negative
    pub rshares: i64,
    pub time: DateTime<Utc>,
}

/// Account receiving a fixed share of the author reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    pub account: String,
    /// Basis points (10000 = 100%)
    pub weight: u16,
}

/// The parts of a post that influence its payout
#[derive(Debug, Clone, Copy)]
pub struct PostRewardInput<'a> {
    pub created: DateTime<Utc>,
    pub votes: &'a [Vote],
    pub allow_curation_rewards: bool,
    pub beneficiaries: &'a [Beneficiary],
}

/// Estimated payout split, denominated in SBD unless noted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayoutResult {
    pub total: Decimal,
    pub curation: Decimal,
    pub author: Decimal,
    /// Remainder of `total - curation - author` after rounding
    pub beneficiaries: Decimal,
    /// Half of the author reward, paid in SBD
    pub sbd_amount: Decimal,
    /// Other half of the author reward converted to STEEM Power
    pub sp_amount: Decimal,
    /// `sbd_amount` in USD
    pub usd_amount: Decimal,
}

/// Curation weight in percent (0..=100) for a vote cast at `voted_at`.
///
/// Grows linearly from 0 at post creation to 100 at 30 minutes. Votes that
/// predate the post count as cast at creation.
pub fn curation_weight(created: DateTime<Utc>, voted_at: DateTime<Utc>) -> Decimal {
    let elapsed = (voted_at - created)
        .num_seconds()
        .clamp(0, CURATION_WINDOW_SECONDS);

    Decimal::from(elapsed) * MAX_CURATION_WEIGHT / Decimal::from(CURATION_WINDOW_SECONDS)
}

fn round_payout(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PAYOUT_DECIMALS, RoundingStrategy::MidpointNearestEven)
}

/// Converts rshares into payouts for one set of global parameters
#[derive(Debug, Clone)]
pub struct RewardCalculator {
    fund_per_share: Decimal,
    base_price: Decimal,
    quote_price: Decimal,
}

impl RewardCalculator {
    pub fn new(params: &GlobalParameters) -> Result<Self> {
        let claims = params.reward_fund.recent_claims;
        if claims.is_zero() {
            return Err(RewardError::ZeroRecentClaims);
        }

        let base_price = params.base_price.amount;
        if base_price <= Decimal::ZERO {
            return Err(RewardError::InvalidBasePrice(params.base_price.to_string()));
        }

        let fund_per_share = params
            .reward_fund
            .reward_balance
            .amount
            .checked_div(claims)
            .ok_or(RewardError::Overflow("fund per share"))?;

        Ok(Self {
            fund_per_share,
            base_price,
            quote_price: params.quote_price,
        })
    }

    /// Network-wide payout per rshare, in reward fund units
    pub fn fund_per_share(&self) -> Decimal {
        self.fund_per_share
    }

    pub fn payout_from_rshares(&self, rshares: Decimal) -> Result<Decimal> {
        rshares
            .checked_mul(self.fund_per_share)
            .and_then(|payout| payout.checked_mul(self.base_price))
            .ok_or(RewardError::Overflow("payout from rshares"))
    }

    pub fn calculate(&self, post: &PostRewardInput<'_>) -> Result<PayoutResult> {
        let mut total_post_rewards = Decimal::ZERO;
        let mut total_curation_rewards = Decimal::ZERO;

        for vote in post.votes {
            let weight = curation_weight(post.created, vote.time);
            let rshares = Decimal::from(vote.rshares);
            let curation_rshares = checked(
                rshares
                    .checked_mul(weight)
                    .and_then(|r| r.checked_div(CURATION_DIVISOR)),
                "curation rshares",
            )?;

            total_post_rewards = checked(
                total_post_rewards.checked_add(self.payout_from_rshares(rshares)?),
                "post rewards",
            )?;
            total_curation_rewards = checked(
                total_curation_rewards.checked_add(self.payout_from_rshares(curation_rshares)?),
                "curation rewards",
            )?;
        }

        let (curation, mut author) = if post.allow_curation_rewards {
            (
                total_curation_rewards,
                checked(
                    total_post_rewards.checked_sub(total_curation_rewards),
                    "author rewards",
                )?,
            )
        } else {
            (Decimal::ZERO, total_post_rewards)
        };

        if !post.beneficiaries.is_empty() {
            let weight: u32 = post.beneficiaries.iter().map(|b| u32::from(b.weight)).sum();
            let percent = Decimal::from(weight) / BENEFICIARY_WEIGHT_PER_PERCENT;
            author = checked(
                author
                    .checked_mul(dec!(100) - percent)
                    .and_then(|a| a.checked_div(dec!(100))),
                "beneficiary share",
            )?;
        }

        let total = round_payout(total_post_rewards);
        let curation = round_payout(curation);
        let author = round_payout(author);
        let beneficiaries = checked(
            total
                .checked_sub(curation)
                .and_then(|rest| rest.checked_sub(author)),
            "beneficiary remainder",
        )?;

        let sbd_amount = author / dec!(2);
        let sp_amount = round_payout(checked(
            sbd_amount.checked_div(self.base_price),
            "sp conversion",
        )?);
        let usd_amount = round_payout(checked(
            sbd_amount.checked_mul(self.quote_price),
            "usd conversion",
        )?);

        Ok(PayoutResult {
            total,
            curation,
            author,
            beneficiaries,
            sbd_amount,
            sp_amount,
            usd_amount,
        })
    }
}

fn checked(value: Option<Decimal>, what: &'static str) -> Result<Decimal> {
    value.ok_or(RewardError::Overflow(what))
}
