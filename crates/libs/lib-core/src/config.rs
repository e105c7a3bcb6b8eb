//! # Application Configuration
//!
//! Configuration loaded from environment variables and validated on startup
//! so a misconfigured tracker fails before its first request.
//!
//! ## Variables
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DEXSCREENER_API_BASE` | `https://api.dexscreener.com/latest/dex/tokens` |
//! | `BATCH_SIZE` | `30` (1..=30) |
//! | `BATCH_DELAY_MS` | `200` |
//! | `BATCH_MAX_RETRIES` | `0` |
//! | `REFRESH_INTERVAL_SECS` | `6` |
//! | `MORALIS_API_KEY` | unset |
//! | `HELIUS_API_KEY` | unset |
//! | `DISCOVERY_API_URL` | unset |
//! | `SEED_PATH` | unset |
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config};
//!
//! init_config().unwrap();
//! let batch_size = core_config().batch_size;
//! ```

use crate::error::{AppError, Result};
use lib_utils::envs::{get_env_or, get_env_parse_or};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

pub const DEFAULT_DEXSCREENER_API_BASE: &str = "https://api.dexscreener.com/latest/dex/tokens";

/// Upstream limit on identifiers per aggregation request.
pub const MAX_BATCH_SIZE: usize = 30;

#[derive(Clone, Debug)]
pub struct Config {
    /// Token-pairs endpoint; identifiers are appended as `{base}/{a,b,c}`.
    pub dexscreener_api_base: String,

    /// Identifiers per request. Valid range: 1-30.
    pub batch_size: usize,

    /// Pause between consecutive batch requests.
    pub batch_delay_ms: u64,

    /// Extra attempts for a failed batch before it is skipped.
    pub batch_max_retries: u32,

    /// List refresh period. Must be at least one second.
    pub refresh_interval_secs: u64,

    pub moralis_api_key: Option<String>,
    pub helius_api_key: Option<String>,
    pub discovery_api_url: Option<String>,

    /// Seed list: a JSON array of token records or a discovery payload.
    pub seed_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dexscreener_api_base: DEFAULT_DEXSCREENER_API_BASE.to_string(),
            batch_size: MAX_BATCH_SIZE,
            batch_delay_ms: 200,
            batch_max_retries: 0,
            refresh_interval_secs: 6,
            moralis_api_key: None,
            helius_api_key: None,
            discovery_api_url: None,
            seed_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        Ok(Self {
            dexscreener_api_base: get_env_or("DEXSCREENER_API_BASE", &defaults.dexscreener_api_base)
                .trim_end_matches('/')
                .to_string(),
            batch_size: get_env_parse_or("BATCH_SIZE", defaults.batch_size)?,
            batch_delay_ms: get_env_parse_or("BATCH_DELAY_MS", defaults.batch_delay_ms)?,
            batch_max_retries: get_env_parse_or("BATCH_MAX_RETRIES", defaults.batch_max_retries)?,
            refresh_interval_secs: get_env_parse_or(
                "REFRESH_INTERVAL_SECS",
                defaults.refresh_interval_secs,
            )?,
            moralis_api_key: optional_env("MORALIS_API_KEY"),
            helius_api_key: optional_env("HELIUS_API_KEY"),
            discovery_api_url: optional_env("DISCOVERY_API_URL"),
            seed_path: optional_env("SEED_PATH").map(PathBuf::from),
        })
    }

    /// Validate configuration values against upstream limits.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(AppError::Config(format!(
                "BATCH_SIZE must be between 1 and {MAX_BATCH_SIZE}, got {}",
                self.batch_size
            )));
        }

        if self.refresh_interval_secs < 1 {
            return Err(AppError::Config(
                "REFRESH_INTERVAL_SECS must be at least 1".to_string(),
            ));
        }

        if !self.dexscreener_api_base.starts_with("http://")
            && !self.dexscreener_api_base.starts_with("https://")
        {
            return Err(AppError::Config(format!(
                "DEXSCREENER_API_BASE must be an http(s) URL, got {}",
                self.dexscreener_api_base
            )));
        }

        Ok(())
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

fn optional_env(name: &'static str) -> Option<String> {
    let val = get_env_or(name, "");
    (!val.is_empty()).then(|| val.trim().to_string())
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration from the environment.
///
/// # Errors
///
/// Returns [`AppError::Config`] if a variable does not parse, validation
/// fails, or the config has already been initialized.
pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    config.validate()?;
    install_config(config)
}

/// Install an already-built configuration as the global one.
pub fn install_config(config: Config) -> Result<()> {
    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("Config has already been initialized".to_string()))
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn core_config() -> &'static Config {
    CONFIG.get().expect("Config must be initialized with init_config() before use")
}
