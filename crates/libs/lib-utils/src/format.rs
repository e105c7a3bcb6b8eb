//! # Display Formatting
//!
//! Compact number and address formatting used in log output and summaries.

/// Format a number with a `K`/`M`/`B` suffix and two decimals.
///
/// Values below one thousand are printed with two decimals and no suffix.
pub fn format_compact(num: f64) -> String {
    let (value, suffix) = if num >= 1_000_000_000.0 {
        (num / 1_000_000_000.0, "B")
    } else if num >= 1_000_000.0 {
        (num / 1_000_000.0, "M")
    } else if num >= 1_000.0 {
        (num / 1_000.0, "K")
    } else {
        return format!("{:.2}", num);
    };

    format!("{:.2}{}", value, suffix)
}

/// Shorten an address to its first and last four characters.
///
/// Addresses of eight characters or fewer are returned as is.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}.....{}", head, tail)
}
