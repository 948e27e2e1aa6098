//! Payout Estimator Core Library
//!
//! Post records, data-source seams, and the cached global reward parameters
//! shared by every payout estimate.

pub mod cache;
pub mod error;
pub mod params;
pub mod post;
pub mod source;

// Re-export main types
pub use cache::{CacheStore, MemoryCache};
pub use error::{CacheError, CoreError, Result, SourceError};
pub use params::{CacheTtls, ParameterCache};
pub use post::{Post, PostIdentifier};
pub use source::{ChainSource, QuoteSource};
