//! # Market Client Errors
//!
//! Failure modes of a single upstream HTTP call. Callers of the single-shot
//! clients receive these as [`AppError`].

use lib_core::AppError;
use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing API key: {0}")]
    MissingApiKey(&'static str),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
}

impl Error {
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Status(status) if *status == StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        match err {
            Error::MissingApiKey(name) => AppError::Config(format!("{name} must be set")),
            Error::Decode(msg) => AppError::Decoding(msg),
            other => AppError::Upstream(other.to_string()),
        }
    }
}
