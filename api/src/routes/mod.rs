//! API routes organization
//!
//! - `pages` - landing page, URL redirect, per-post HTML view
//! - `rewards` - batch JSON estimates
//!
//! Each submodule exports its handlers; this module wires them together.

pub mod pages;
pub mod rewards;

use crate::ApiState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

/// Create the main router with all endpoints
pub fn create_routes() -> Router<ApiState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(health_check))
        .route(
            "/rewards.json",
            get(rewards::rewards_from_query).post(rewards::rewards_from_form),
        )
        .route("/{category}/{author}/{permlink}", get(pages::post_page))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    uptime_seconds: u64,
}

async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
