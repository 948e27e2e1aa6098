//! Payout Estimator Network Module
//!
//! Outbound HTTP clients backing the estimator's data sources:
//! - `rpc` - Steem node JSON-RPC (`condenser_api`)
//! - `ticker` - public USD price ticker for SBD

pub mod error;
pub mod rpc;
pub mod ticker;

pub use error::NetworkError;
pub use rpc::{SteemClient, DEFAULT_NODE};
pub use ticker::{TickerClient, DEFAULT_TICKER_URL};

use std::time::Duration;

/// Connect timeout applied on top of each client's request timeout
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, NetworkError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .user_agent(concat!("payout-estimator/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
