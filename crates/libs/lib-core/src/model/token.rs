//! # Token Record
//!
//! The canonical in-memory representation of one tradable token.
//!
//! ## Wire Format
//!
//! Records serialize as camelCase JSON and share their shape with the static
//! seed list shipped with the app:
//!
//! ```json
//! {
//!   "mintadd": "7GCihgDB8fe6KNjn2MYtkzZcRjQy3t9GHdC8uHYmW2hr",
//!   "ticker": "POPCAT",
//!   "name": "Popcat",
//!   "description": "",
//!   "img": { "logo": "https://...", "banner": "" },
//!   "price": 0.41,
//!   "dexId": "raydium",
//!   "priceChange": { "fiveH": -1.2, "twentyFourH": 4.8 },
//!   "txn": { "buys": 1021, "sells": 988 },
//!   "tokenomics": {
//!     "marketCap": 402000000,
//!     "volume": { "fiveH": 1200000, "twentyFourH": 5600000 },
//!     "holder": 91000,
//!     "liquidity": 12000000,
//!     "price": 0.41
//!   },
//!   "media": [],
//!   "watchlist": false
//! }
//! ```
//!
//! The short lookback window is the upstream `h6` value. Older seed files
//! label it `fiveH`; both `fiveH` and `short` are accepted on input.
//!
//! Decoding never fails on a field: numbers may arrive as strings, and any
//! field with the wrong shape falls back to its default.

use crate::lenient;
use serde::{Deserialize, Serialize};

/// Normalize a mint/contract identifier for comparison.
///
/// Every identifier comparison in the workspace goes through this function on
/// both sides so whitespace or casing drift in upstream data never causes a
/// missed match.
pub fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}

/// One tradable token and its latest known market data.
///
/// `mint` is the only lookup key and never changes once a record exists.
/// `watchlist` is user state: only explicit user action changes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenRecord {
    #[serde(rename = "mintadd", deserialize_with = "lenient::or_default")]
    pub mint: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub ticker: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub description: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub img: TokenImages,
    /// Current price in USD.
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub price: f64,
    /// Price denominated in the pair's quote asset (0 when unknown).
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub price_native: f64,
    /// Market venue the price was read from (e.g. "raydium").
    #[serde(deserialize_with = "lenient::or_default")]
    pub dex_id: String,
    /// Percentage price change per lookback window.
    #[serde(deserialize_with = "lenient::or_default")]
    pub price_change: Windows,
    /// Buy/sell transaction counts over the last 24 hours.
    #[serde(deserialize_with = "lenient::or_default")]
    pub txn: TxnCounts,
    #[serde(deserialize_with = "lenient::or_default")]
    pub tokenomics: Tokenomics,
    #[serde(deserialize_with = "lenient::list_or_empty")]
    pub media: Vec<MediaItem>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub watchlist: bool,
}

impl TokenRecord {
    /// Identifier in comparison form, see [`normalize_id`].
    pub fn normalized_id(&self) -> String {
        normalize_id(&self.mint)
    }

    /// Whether this record carries a usable identifier.
    pub fn has_id(&self) -> bool {
        !self.mint.trim().is_empty()
    }

    /// Total 24h transactions (buys + sells).
    pub fn total_txns(&self) -> u64 {
        self.txn.buys.saturating_add(self.txn.sells)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenImages {
    #[serde(deserialize_with = "lenient::or_default")]
    pub logo: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub banner: String,
}

/// A value tracked over the short (6h) and 24h lookback windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Windows {
    #[serde(rename = "fiveH", alias = "short", deserialize_with = "lenient::number_or_zero")]
    pub short: f64,
    #[serde(rename = "twentyFourH", alias = "day", deserialize_with = "lenient::number_or_zero")]
    pub day: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TxnCounts {
    #[serde(deserialize_with = "lenient::count")]
    pub buys: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub sells: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Tokenomics {
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub market_cap: f64,
    #[serde(deserialize_with = "lenient::or_default")]
    pub volume: Windows,
    /// Holder count. The price aggregation source never reports it, so
    /// market-data merges leave it alone.
    #[serde(deserialize_with = "lenient::count")]
    pub holder: u64,
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub liquidity: f64,
    #[serde(deserialize_with = "lenient::number_or_zero")]
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaItem {
    #[serde(rename = "type", deserialize_with = "lenient::or_default")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub media_url: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub position: i64,
}
