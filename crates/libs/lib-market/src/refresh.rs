//! # Refresh Loop
//!
//! Keeps a displayed token collection current by re-running the batch
//! fetcher on a fixed interval.
//!
//! ## Behavior
//! - The first cycle runs as soon as the loop is spawned
//! - Each cycle runs in its own task, so a slow cycle may overlap the next
//!   one; whichever finishes last wins
//! - The loop stops on its own when the collection is empty
//! - Cancelling (or dropping) the [`RefreshHandle`] stops the ticker, and any
//!   cycle still in flight has its result discarded
//!
//! The watch flag belongs to the user. A refresh result never overwrites it,
//! even when the user toggled it while the refresh was in flight.

use crate::dexscreener::batch::{refresh_records, BatchConfig, PairSource};
use lib_core::{normalize_id, TokenRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Refresh period for list screens.
pub const LIST_REFRESH_INTERVAL: Duration = Duration::from_secs(6);

/// Refresh period for a single-token detail screen.
pub const DETAIL_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Shortest period [`RefreshLoop::spawn`] accepts; shorter ones are raised to it.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

// region: --- Collection
/// Change notification sent to collection subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionUpdate {
    /// The whole list was swapped for a new one.
    Replaced { len: usize },
    /// A refresh cycle merged fresh market data.
    Refreshed { len: usize },
    /// The user changed a watch flag.
    WatchChanged { mint: String, watched: bool },
}

/// Shared, observable token list owned by one consuming context.
#[derive(Debug, Clone)]
pub struct TokenCollection {
    records: Arc<RwLock<Vec<TokenRecord>>>,
    update_tx: broadcast::Sender<CollectionUpdate>,
}

impl Default for TokenCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TokenCollection {
    pub fn new(records: Vec<TokenRecord>) -> Self {
        let (update_tx, _) = broadcast::channel(64);
        Self {
            records: Arc::new(RwLock::new(records)),
            update_tx,
        }
    }

    /// Get a receiver for collection changes.
    pub fn subscribe(&self) -> broadcast::Receiver<CollectionUpdate> {
        self.update_tx.subscribe()
    }

    pub async fn snapshot(&self) -> Vec<TokenRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Swap the list wholesale, watch flags included.
    pub async fn replace(&self, records: Vec<TokenRecord>) {
        let len = records.len();
        *self.records.write().await = records;
        self.notify(CollectionUpdate::Replaced { len });
    }

    /// Install a refresh result, keeping the live watch flag of every record.
    pub async fn apply_refresh(&self, refreshed: Vec<TokenRecord>) {
        let mut records = self.records.write().await;

        let live_flags: HashMap<String, bool> = records
            .iter()
            .map(|r| (r.normalized_id(), r.watchlist))
            .collect();

        *records = refreshed
            .into_iter()
            .map(|mut r| {
                if let Some(&watched) = live_flags.get(&r.normalized_id()) {
                    r.watchlist = watched;
                }
                r
            })
            .collect();

        let len = records.len();
        drop(records);
        self.notify(CollectionUpdate::Refreshed { len });
    }

    /// Flip the watch flag for `mint`. Returns the new flag, or `None` when
    /// no record matches.
    pub async fn toggle_watch(&self, mint: &str) -> Option<bool> {
        let watched = lib_core::watchlist::toggle(&mut self.records.write().await, mint)?;
        self.notify(CollectionUpdate::WatchChanged {
            mint: normalize_id(mint),
            watched,
        });
        Some(watched)
    }

    /// Set the watch flag for `mint`. Returns `false` when no record matches.
    pub async fn set_watch(&self, mint: &str, watched: bool) -> bool {
        let found = lib_core::watchlist::set(&mut self.records.write().await, mint, watched);
        if found {
            self.notify(CollectionUpdate::WatchChanged {
                mint: normalize_id(mint),
                watched,
            });
        }
        found
    }

    fn notify(&self, update: CollectionUpdate) {
        // No subscribers is fine
        if self.update_tx.send(update).is_err() {
            debug!("No active subscribers for collection updates");
        }
    }
}
// endregion: --- Collection

// region: --- Loop
/// Periodic refresh driver for one [`TokenCollection`].
pub struct RefreshLoop;

impl RefreshLoop {
    /// Start refreshing `collection` every `interval`.
    ///
    /// The returned handle owns the loop: dropping it stops refreshing.
    /// An `interval` below [`MIN_REFRESH_INTERVAL`] is raised to it.
    pub fn spawn<S>(
        source: Arc<S>,
        collection: TokenCollection,
        interval: Duration,
        cfg: BatchConfig,
    ) -> RefreshHandle
    where
        S: PairSource + ?Sized + 'static,
    {
        let interval = if interval < MIN_REFRESH_INTERVAL {
            warn!(
                "Refresh interval {}ms is too short, using {}ms",
                interval.as_millis(),
                MIN_REFRESH_INTERVAL.as_millis()
            );
            MIN_REFRESH_INTERVAL
        } else {
            interval
        };

        let cancelled = Arc::new(AtomicBool::new(false));
        let cycles = Arc::new(AtomicU64::new(0));

        let ticker = {
            let cancelled = Arc::clone(&cancelled);
            let cycles = Arc::clone(&cycles);
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

                loop {
                    // First tick completes immediately
                    ticker.tick().await;
                    if cancelled.load(Ordering::SeqCst) {
                        break;
                    }

                    let snapshot = collection.snapshot().await;
                    if snapshot.is_empty() {
                        info!("Collection is empty, refresh loop stopping");
                        break;
                    }

                    let cycle = cycles.fetch_add(1, Ordering::SeqCst) + 1;
                    debug!("Starting refresh cycle {} ({} tokens)", cycle, snapshot.len());

                    tokio::spawn(run_cycle(
                        Arc::clone(&source),
                        collection.clone(),
                        snapshot,
                        cfg,
                        Arc::clone(&cancelled),
                        cycle,
                    ));
                }
            })
        };

        info!("Refresh loop started ({}ms interval)", interval.as_millis());
        RefreshHandle {
            ticker,
            cancelled,
            cycles,
        }
    }
}

async fn run_cycle<S>(
    source: Arc<S>,
    collection: TokenCollection,
    snapshot: Vec<TokenRecord>,
    cfg: BatchConfig,
    cancelled: Arc<AtomicBool>,
    cycle: u64,
) where
    S: PairSource + ?Sized,
{
    let refreshed = refresh_records(source.as_ref(), &snapshot, &cfg).await;

    if cancelled.load(Ordering::SeqCst) {
        debug!("Refresh cycle {} finished after cancel, discarding", cycle);
        return;
    }

    collection.apply_refresh(refreshed).await;
    debug!("Refresh cycle {} applied", cycle);
}

/// Owner handle for a running [`RefreshLoop`].
#[derive(Debug)]
pub struct RefreshHandle {
    ticker: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
    cycles: Arc<AtomicU64>,
}

impl RefreshHandle {
    /// Stop scheduling cycles. Results of cycles still in flight are dropped.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            debug!("Refresh loop cancelled");
        }
        self.ticker.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Whether the ticker has stopped (cancelled or collection emptied).
    pub fn is_finished(&self) -> bool {
        self.ticker.is_finished()
    }

    /// Cycles started so far.
    pub fn cycles_started(&self) -> u64 {
        self.cycles.load(Ordering::SeqCst)
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
// endregion: --- Loop
