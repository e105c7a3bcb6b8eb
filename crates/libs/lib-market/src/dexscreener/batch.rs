//! # Batch Fetcher
//!
//! Splits a token list into request-sized batches, fetches them one after
//! another, and merges whatever came back.
//!
//! A failed batch (transport error, non-2xx, unparseable body, no `pairs`)
//! is logged and skipped. The records in it keep their last known values and
//! the remaining batches still run. Nothing in this module returns an error
//! to its caller.

use super::merge::merge_pairs;
use super::types::DexPair;
use crate::retry::{retry_with_backoff, RetryPolicy};
use async_trait::async_trait;
use lib_core::config::{Config, MAX_BATCH_SIZE};
use lib_core::TokenRecord;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Anything that can answer one batched pair lookup.
#[async_trait]
pub trait PairSource: Send + Sync {
    /// Issue a single upstream request for `ids`.
    async fn fetch_pairs(&self, ids: &[String]) -> anyhow::Result<Vec<DexPair>>;
}

#[async_trait]
impl<T: PairSource + ?Sized> PairSource for Arc<T> {
    async fn fetch_pairs(&self, ids: &[String]) -> anyhow::Result<Vec<DexPair>> {
        (**self).fetch_pairs(ids).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Identifiers per request, clamped to 1..=30.
    pub batch_size: usize,
    /// Pause between consecutive requests.
    pub batch_delay: Duration,
    /// Extra attempts per batch before skipping it.
    pub max_retries: u32,
    /// First retry delay; doubles on each further retry.
    pub retry_base_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
            batch_delay: Duration::from_millis(200),
            max_retries: 0,
            retry_base_delay: Duration::from_secs(1),
        }
    }
}

impl BatchConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            batch_size: config.batch_size,
            batch_delay: config.batch_delay(),
            max_retries: config.batch_max_retries,
            ..Default::default()
        }
    }

    fn effective_batch_size(&self) -> usize {
        self.batch_size.clamp(1, MAX_BATCH_SIZE)
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_base_delay)
    }
}

/// Split record identifiers into contiguous batches.
///
/// Records without an identifier are left out. Input order is preserved and
/// only the last batch may be short.
pub fn partition_ids(records: &[TokenRecord], batch_size: usize) -> Vec<Vec<String>> {
    let ids: Vec<String> = records
        .iter()
        .filter(|r| r.has_id())
        .map(|r| r.mint.trim().to_string())
        .collect();

    ids.chunks(batch_size.clamp(1, MAX_BATCH_SIZE))
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Fetch every batch in order and concatenate the pairs that came back.
pub async fn collect_pairs<S>(source: &S, batches: &[Vec<String>], cfg: &BatchConfig) -> Vec<DexPair>
where
    S: PairSource + ?Sized,
{
    let policy = cfg.retry_policy();
    let mut pairs = Vec::new();

    for (i, batch) in batches.iter().enumerate() {
        if i > 0 && !cfg.batch_delay.is_zero() {
            tokio::time::sleep(cfg.batch_delay).await;
        }

        debug!("Fetching batch {}/{} ({} ids)", i + 1, batches.len(), batch.len());

        match retry_with_backoff(policy, |_| true, || source.fetch_pairs(batch)).await {
            Ok(batch_pairs) => {
                debug!("Batch {} returned {} pairs", i + 1, batch_pairs.len());
                pairs.extend(batch_pairs);
            }
            Err(e) => {
                warn!("Batch {}/{} failed, skipping: {}", i + 1, batches.len(), e);
            }
        }
    }

    pairs
}

/// Refresh a token list against a pair source.
///
/// Returns the merged list, or a copy of the input when there is nothing to
/// look up. Never fails.
pub async fn refresh_records<S>(source: &S, records: &[TokenRecord], cfg: &BatchConfig) -> Vec<TokenRecord>
where
    S: PairSource + ?Sized,
{
    let batches = partition_ids(records, cfg.effective_batch_size());
    if batches.is_empty() {
        debug!("No identifiers to refresh");
        return records.to_vec();
    }

    let pairs = collect_pairs(source, &batches, cfg).await;
    info!(
        "Refreshed {} tokens: {} batches, {} pairs",
        records.len(),
        batches.len(),
        pairs.len()
    );

    merge_pairs(records, &pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Answers with one pair per id priced at 2.0, failing the listed calls.
    #[derive(Default)]
    struct FakeSource {
        calls: Mutex<Vec<Vec<String>>>,
        failing_calls: HashSet<usize>,
    }

    impl FakeSource {
        fn failing(calls: &[usize]) -> Self {
            Self {
                failing_calls: calls.iter().copied().collect(),
                ..Default::default()
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PairSource for FakeSource {
        async fn fetch_pairs(&self, ids: &[String]) -> anyhow::Result<Vec<DexPair>> {
            let call = {
                let mut calls = self.calls.lock().unwrap();
                calls.push(ids.to_vec());
                calls.len() - 1
            };
            if self.failing_calls.contains(&call) {
                anyhow::bail!("HTTP 503");
            }
            Ok(ids
                .iter()
                .map(|id| {
                    serde_json::from_value(json!({
                        "baseToken": { "address": id },
                        "priceUsd": "2.0"
                    }))
                    .unwrap()
                })
                .collect())
        }
    }

    fn records(n: usize) -> Vec<TokenRecord> {
        (0..n)
            .map(|i| TokenRecord {
                mint: format!("Mint{i:03}"),
                price: 1.0,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_partition_sizes() {
        let batches = partition_ids(&records(65), 30);
        let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![30, 30, 5]);
        assert_eq!(batches[0][0], "Mint000");
        assert_eq!(batches[2][4], "Mint064");
    }

    #[test]
    fn test_partition_skips_blank_ids() {
        let mut list = records(3);
        list[1].mint = "   ".to_string();
        let batches = partition_ids(&list, 30);
        assert_eq!(batches, vec![vec!["Mint000".to_string(), "Mint002".to_string()]]);
        assert!(partition_ids(&[], 30).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_request_per_batch_with_delay() {
        let source = FakeSource::default();
        let start = tokio::time::Instant::now();

        let refreshed = refresh_records(&source, &records(65), &BatchConfig::default()).await;

        let sizes: Vec<usize> = source.calls().iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![30, 30, 5]);
        assert_eq!(start.elapsed(), Duration::from_millis(400));
        assert!(refreshed.iter().all(|r| r.price == 2.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_batch_is_skipped() {
        let source = FakeSource::failing(&[1]);
        let input = records(65);

        let refreshed = refresh_records(&source, &input, &BatchConfig::default()).await;

        assert_eq!(source.calls().len(), 3);
        assert_eq!(refreshed.len(), 65);
        assert!(refreshed[..30].iter().all(|r| r.price == 2.0));
        assert_eq!(&refreshed[30..60], &input[30..60]);
        assert!(refreshed[60..].iter().all(|r| r.price == 2.0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_batches_fail_returns_input() {
        let source = FakeSource::failing(&[0, 1, 2]);
        let input = records(65);
        let refreshed = refresh_records(&source, &input, &BatchConfig::default()).await;
        assert_eq!(refreshed, input);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers_failed_batch() {
        let source = FakeSource::failing(&[0]);
        let cfg = BatchConfig {
            max_retries: 1,
            ..Default::default()
        };

        let refreshed = refresh_records(&source, &records(5), &cfg).await;

        assert_eq!(source.calls().len(), 2);
        assert!(refreshed.iter().all(|r| r.price == 2.0));
    }

    #[tokio::test]
    async fn test_no_ids_means_no_requests() {
        let source = FakeSource::default();
        let mut input = records(2);
        for r in &mut input {
            r.mint.clear();
        }
        let refreshed = refresh_records(&source, &input, &BatchConfig::default()).await;
        assert!(source.calls().is_empty());
        assert_eq!(refreshed, input);
    }
}
