//! Reward calculation error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewardError {
    #[error("Invalid asset: {0}")]
    InvalidAsset(String),

    #[error("Reward fund reports zero recent claims")]
    ZeroRecentClaims,

    #[error("Invalid base price: {0}")]
    InvalidBasePrice(String),

    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

pub type Result<T> = std::result::Result<T, RewardError>;
