//! Network error types

use payout_core::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(u16),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Post not found: {0}")]
    PostNotFound(String),
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        NetworkError::Decode(err.to_string())
    }
}

impl From<NetworkError> for SourceError {
    fn from(err: NetworkError) -> Self {
        match err {
            NetworkError::PostNotFound(id) => SourceError::PostNotFound(id),
            NetworkError::Rpc { code, message } => SourceError::Rpc { code, message },
            NetworkError::Decode(msg) => SourceError::Decode(msg),
            NetworkError::Request(e) if e.is_decode() => SourceError::Decode(e.to_string()),
            other => SourceError::Transport(other.to_string()),
        }
    }
}
