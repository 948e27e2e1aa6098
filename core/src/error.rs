//! Core error types

use payout_economics::RewardError;
use thiserror::Error;

/// Failures reported by the chain node or the price ticker
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Decode error: {0}")]
    Decode(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cache error: {0}")]
pub struct CacheError(pub String);

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Reward(#[from] RewardError),

    #[error("Invalid post identifier: {0}")]
    InvalidIdentifier(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
