//! # Token Search
//!
//! Free-text lookup over a token collection.

use crate::model::TokenRecord;

/// Find records whose name, ticker or mint contains `query`.
///
/// Matching is case-insensitive and ignores surrounding whitespace in the
/// query. A blank query matches nothing.
pub fn search_tokens<'a>(records: &'a [TokenRecord], query: &str) -> Vec<&'a TokenRecord> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&query)
                || r.ticker.to_lowercase().contains(&query)
                || r.mint.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(mint: &str, ticker: &str, name: &str) -> TokenRecord {
        TokenRecord {
            mint: mint.to_string(),
            ticker: ticker.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_matches_name_ticker_or_mint() {
        let records = vec![
            token("MintAAA", "DOG", "Good Boy"),
            token("MintBBB", "CAT", "Dogfather"),
            token("DoGeMint", "XYZ", "Other"),
            token("MintCCC", "ZZZ", "Nothing"),
        ];

        let hits: Vec<&str> = search_tokens(&records, "  dog ")
            .into_iter()
            .map(|r| r.mint.as_str())
            .collect();
        assert_eq!(hits, vec!["MintAAA", "MintBBB", "DoGeMint"]);
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let records = vec![token("a", "A", "A")];
        assert!(search_tokens(&records, "   ").is_empty());
    }
}
