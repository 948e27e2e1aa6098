mod error;
mod routes;
mod services;
mod state;
mod templates;

pub use error::{ApiError, ApiResult};
pub use routes::rewards::{RewardEntry, RewardsResponse};
pub use services::{PostEstimate, RewardService};
pub use state::ApiState;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Full application router with CORS and request tracing
pub fn create_app(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    routes::create_routes()
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_server(addr: SocketAddr, state: ApiState) -> Result<(), std::io::Error> {
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("🚀 Payout estimator listening on http://{}", listener.local_addr()?);
    tracing::info!("📡 Endpoints:");
    tracing::info!("   GET  /?url=<post url>");
    tracing::info!("   GET  /<category>/@<author>/<permlink>");
    tracing::info!("   GET  /rewards.json?links=<link,link,...>");
    tracing::info!("   POST /rewards.json  (form field: links)");
    tracing::info!("   GET  /health");

    axum::serve(listener, app).await
}
