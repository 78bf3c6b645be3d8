//! Periodic feed refresh.
//!
//! The poller fetches immediately when started and then once per interval.
//! A successful fetch replaces the snapshot wholesale; a failed one is logged
//! and recorded, and the previous trains stay on display.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use super::error::FeedError;
use super::snapshot::TrainSnapshot;
use super::source::TrainSource;

/// Default interval between fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5001);

/// What happens when a tick fires while a fetch is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchOverlap {
    /// Wait for the running fetch; late ticks are delayed, not bunched.
    #[default]
    Serialize,

    /// Start another fetch regardless. Whichever response lands last wins.
    AllowOverlap,
}

impl FetchOverlap {
    /// Parse `serialize` or `overlap`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "serialize" => Some(FetchOverlap::Serialize),
            "overlap" => Some(FetchOverlap::AllowOverlap),
            _ => None,
        }
    }
}

/// Refreshes a [`TrainSnapshot`] from a [`TrainSource`].
pub struct Poller<S> {
    source: Arc<S>,
    snapshot: TrainSnapshot,
    interval: Duration,
    overlap: FetchOverlap,
}

impl<S> Clone for Poller<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            snapshot: self.snapshot.clone(),
            interval: self.interval,
            overlap: self.overlap,
        }
    }
}

impl<S: TrainSource> Poller<S> {
    /// Create a poller. Intervals shorter than a millisecond are raised to one.
    pub fn new(source: S, snapshot: TrainSnapshot, interval: Duration) -> Self {
        Self {
            source: Arc::new(source),
            snapshot,
            interval: interval.max(Duration::from_millis(1)),
            overlap: FetchOverlap::default(),
        }
    }

    /// Set the overlap policy.
    pub fn with_overlap(mut self, overlap: FetchOverlap) -> Self {
        self.overlap = overlap;
        self
    }

    /// Fetch once and update the snapshot.
    ///
    /// On success the snapshot is replaced and the number of trains returned.
    /// On failure the error is logged and recorded on the snapshot, the train
    /// list is left as it was, and the error is returned.
    pub async fn poll_once(&self) -> Result<usize, FeedError> {
        match self.source.fetch().await {
            Ok(trains) => {
                let count = trains.len();
                let generation = self.snapshot.replace(trains, Utc::now()).await;
                debug!(count, generation, "refreshed train snapshot");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch train feed; keeping previous snapshot");
                self.snapshot.record_failure(e.to_string(), Utc::now()).await;
                Err(e)
            }
        }
    }

    /// Start polling in a background task.
    pub fn spawn(self) -> PollerHandle {
        PollerHandle {
            task: tokio::spawn(self.run()),
        }
    }

    async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut in_flight = JoinSet::new();

        loop {
            // The first tick completes immediately.
            ticker.tick().await;

            match self.overlap {
                FetchOverlap::Serialize => {
                    let _ = self.poll_once().await;
                }
                FetchOverlap::AllowOverlap => {
                    while in_flight.try_join_next().is_some() {}
                    let poller = self.clone();
                    in_flight.spawn(async move {
                        let _ = poller.poll_once().await;
                    });
                }
            }
        }
    }
}

/// Handle to a running poller.
///
/// Dropping the handle leaves the poller running; call
/// [`PollerHandle::shutdown`] to stop it.
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop polling. Fetches still in flight are cancelled and will not
    /// touch the snapshot.
    pub async fn shutdown(self) {
        self.task.abort();
        let _ = self.task.await;
    }
}
