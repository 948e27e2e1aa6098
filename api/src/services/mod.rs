//! Service layer for business logic
//!
//! Services sit between the HTTP handlers and the data sources, so the
//! estimate flow can be tested without the HTTP layer.

pub mod rewards;

pub use rewards::{PostEstimate, RewardService};
