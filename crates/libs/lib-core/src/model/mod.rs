//! # Domain Model
//!
//! Canonical token records and the aggregate market metrics snapshot.

// region: --- Modules
pub mod metrics;
pub mod token;
// endregion: --- Modules

// region: --- Re-exports
pub use metrics::{CategoryBreakdown, MarketMetrics};
pub use token::{normalize_id, MediaItem, TokenImages, TokenRecord, Tokenomics, TxnCounts, Windows};
// endregion: --- Re-exports
