//! # Utilities Library
//!
//! Shared helpers for environment variables, time and display formatting.

pub mod envs;
pub mod format;
pub mod time;

// Re-export commonly used functions
pub use envs::{get_env, get_env_or, get_env_parse_or};
pub use format::{format_compact, short_address};
pub use time::{format_clock, now_utc};
