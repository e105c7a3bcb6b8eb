//! # Time Utilities
//!
//! Timestamps for refresh logging using chrono.

use chrono::{DateTime, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Wall-clock part only, `HH:MM:SS`.
pub fn format_clock(time: DateTime<Utc>) -> String {
    time.format("%H:%M:%S").to_string()
}
