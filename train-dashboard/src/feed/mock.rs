//! Mock train feed for running without the upstream service.
//!
//! Serves a fixed train list, optionally loaded from a JSON file with the
//! same shape as the live feed.

use std::path::Path;
use std::sync::Arc;

use crate::domain::Train;

use super::client::parse_trains;
use super::error::FeedError;
use super::source::TrainSource;

/// Mock feed serving an in-memory train list.
#[derive(Clone, Default)]
pub struct MockFeed {
    trains: Arc<Vec<Train>>,
}

impl MockFeed {
    /// Create a mock feed serving `trains`.
    pub fn new(trains: Vec<Train>) -> Self {
        Self {
            trains: Arc::new(trains),
        }
    }

    /// Load a mock feed from a JSON file containing an array of trains.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| FeedError::Mock {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        Ok(Self::new(parse_trains(&json)?))
    }
}

impl TrainSource for MockFeed {
    async fn fetch(&self) -> Result<Vec<Train>, FeedError> {
        Ok(self.trains.as_ref().clone())
    }
}
