//! # Core Library
//!
//! Canonical token model, normalization, sorting, configuration and the
//! shared error type.

pub mod config;
pub mod error;
pub mod lenient;
pub mod model;
pub mod normalize;
pub mod search;
pub mod seed;
pub mod sort;
pub mod watchlist;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::{normalize_id, MarketMetrics, TokenRecord};
pub use normalize::{normalize_discovery, normalize_token, parse_discovery};
pub use search::search_tokens;
pub use seed::load_seed;
pub use sort::{sort_records, sort_token_list, SortKey};
