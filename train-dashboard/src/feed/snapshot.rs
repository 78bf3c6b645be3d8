//! The shared in-memory train snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::domain::Train;

/// The most recent failed fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedFailure {
    pub message: String,
    pub at: DateTime<Utc>,
}

/// A point-in-time copy of the snapshot state.
#[derive(Debug, Clone, Default)]
pub struct SnapshotView {
    /// Trains from the last successful fetch.
    pub trains: Arc<Vec<Train>>,

    /// Number of successful replacements so far.
    pub generation: u64,

    /// When the trains were last replaced.
    pub updated_at: Option<DateTime<Utc>>,

    /// Set when the latest fetch failed; cleared by the next success.
    pub last_failure: Option<FeedFailure>,
}

impl SnapshotView {
    /// Whether the displayed trains may be out of date.
    pub fn is_stale(&self) -> bool {
        self.last_failure.is_some()
    }
}

/// Thread-safe handle to the current train list.
///
/// The list is only ever replaced wholesale. Readers get an `Arc` to the list
/// that was current when they read it.
#[derive(Clone, Default)]
pub struct TrainSnapshot {
    inner: Arc<RwLock<SnapshotView>>,
}

impl TrainSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy out the current state.
    pub async fn current(&self) -> SnapshotView {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// The current train list.
    pub async fn trains(&self) -> Arc<Vec<Train>> {
        let guard = self.inner.read().await;
        Arc::clone(&guard.trains)
    }

    /// Replace the train list and clear any recorded failure.
    ///
    /// Returns the new generation.
    pub async fn replace(&self, trains: Vec<Train>, at: DateTime<Utc>) -> u64 {
        let mut guard = self.inner.write().await;
        guard.trains = Arc::new(trains);
        guard.generation += 1;
        guard.updated_at = Some(at);
        guard.last_failure = None;
        guard.generation
    }

    /// Record a failed fetch. The train list is left untouched.
    pub async fn record_failure(&self, message: impl Into<String>, at: DateTime<Utc>) {
        let mut guard = self.inner.write().await;
        guard.last_failure = Some(FeedFailure {
            message: message.into(),
            at,
        });
    }
}
