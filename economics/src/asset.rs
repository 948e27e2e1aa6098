//! Chain asset amounts such as `"1000.000 STEEM"` or `"0.250 SBD"`

use crate::error::{Result, RewardError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Decimal amount tagged with its currency symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Asset {
    pub amount: Decimal,
    pub symbol: String,
}

impl Asset {
    pub fn new(amount: Decimal, symbol: impl Into<String>) -> Self {
        Self {
            amount,
            symbol: symbol.into(),
        }
    }
}

impl FromStr for Asset {
    type Err = RewardError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let (amount, symbol) = match (parts.next(), parts.next(), parts.next()) {
            (Some(amount), Some(symbol), None) => (amount, symbol),
            _ => return Err(RewardError::InvalidAsset(s.to_string())),
        };

        if !symbol.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(RewardError::InvalidAsset(s.to_string()));
        }

        let amount =
            Decimal::from_str(amount).map_err(|_| RewardError::InvalidAsset(s.to_string()))?;

        Ok(Asset::new(amount, symbol))
    }
}

impl TryFrom<String> for Asset {
    type Error = RewardError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.to_string()
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.symbol)
    }
}
