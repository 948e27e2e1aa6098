//! API Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use payout_core::{CoreError, SourceError};
use payout_economics::RewardError;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::PostNotFound(id) => ApiError::PostNotFound(id),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl From<RewardError> for ApiError {
    fn from(err: RewardError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Source(source) => source.into(),
            CoreError::InvalidIdentifier(link) => ApiError::PostNotFound(link),
            CoreError::Reward(reward) => reward.into(),
            CoreError::Cache(cache) => ApiError::Internal(cache.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::PostNotFound(id) => {
                tracing::debug!("Post not found: {}", id);
                return StatusCode::NOT_FOUND.into_response();
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Upstream(msg) => {
                tracing::error!("❌ Upstream failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "upstream_error", msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!("❌ Internal failure: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
            }
        };

        let body = Json(json!({
            "error": error_type,
            "message": message,
        }));

        (status, body).into_response()
    }
}
