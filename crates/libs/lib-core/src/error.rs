//! # Centralized Error Handling
//!
//! Application-wide error type [`AppError`] shared by the core and market
//! libraries and the tracker binary.
//!
//! ## Error Categories
//!
//! 1. **Caller Errors** - bad arguments
//!    - [`InvalidInput`](AppError::InvalidInput)
//!
//! 2. **Environment Errors** - startup and upstream failures
//!    - [`Config`](AppError::Config)
//!    - [`Upstream`](AppError::Upstream) (HTTP failure or non-2xx status)
//!    - [`Decoding`](AppError::Decoding) (response body has the wrong shape)
//!    - [`Internal`](AppError::Internal)
//!
//! Note that the refresh path never surfaces these to its caller: a failed
//! batch is logged and skipped. `AppError` reaches callers of the
//! single-shot clients (holders, portfolio) and startup code.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_limit(raw: &str) -> Result<usize> {
//!     raw.parse()
//!         .map_err(|_| AppError::InvalidInput(format!("limit must be a number, got {raw}")))
//! }
//!
//! assert!(parse_limit("10").is_ok());
//! assert!(parse_limit("ten").is_err());
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup, environment or seed loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Upstream service error (network, timeout, rate limit, non-2xx).
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Response body could not be decoded into the expected shape.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Invalid caller input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decoding(format!("JSON error: {}", err))
    }
}

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
