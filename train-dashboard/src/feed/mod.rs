//! Train feed client and background refresh.
//!
//! The feed is a single HTTP endpoint returning the full train list as a
//! JSON array. [`Poller`] fetches it on a fixed interval and swaps the result
//! into a shared [`TrainSnapshot`]; failures are logged and the previous
//! snapshot stays in place.

mod client;
mod error;
mod mock;
mod poller;
mod snapshot;
mod source;

pub use client::{DEFAULT_FEED_URL, FeedClient, FeedClientConfig};
pub use error::FeedError;
pub use mock::MockFeed;
pub use poller::{DEFAULT_POLL_INTERVAL, FetchOverlap, Poller, PollerHandle};
pub use snapshot::{FeedFailure, SnapshotView, TrainSnapshot};
pub use source::TrainSource;
