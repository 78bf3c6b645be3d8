//! The seam between the poller and wherever trains come from.

use std::future::Future;
use std::sync::Arc;

use crate::domain::Train;

use super::error::FeedError;

/// A source of complete train lists.
///
/// Each successful fetch returns the whole current list; the poller never
/// merges results.
pub trait TrainSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Train>, FeedError>> + Send;
}

impl<T: TrainSource> TrainSource for Arc<T> {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Train>, FeedError>> + Send {
        (**self).fetch()
    }
}
