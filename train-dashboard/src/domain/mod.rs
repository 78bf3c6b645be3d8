//! Domain types for the train dashboard.
//!
//! Trains arrive from the feed as loosely-typed records. This module holds
//! the record type itself, the closed set of categories the dashboard
//! partitions them into, and the arrival-time rules that decide which
//! trains are upcoming.

mod category;
mod time;
mod train;

pub use category::TrainCategory;
pub use time::{ArrivalWindow, TimeError, WINDOW_HOURS, parse_arrival};
pub use train::Train;
