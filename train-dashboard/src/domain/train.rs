//! Train records as delivered by the schedule feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::TrainCategory;
use super::time::{TimeError, parse_arrival};

/// A single train from the feed.
///
/// Fields are kept as the feed sent them. `kind` holds the raw `type` label
/// and `expected_arrival_time` the raw timestamp string; use [`Train::category`]
/// and [`Train::expected_arrival`] for the interpreted values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Train {
    /// Train identifier, unique within one feed snapshot.
    pub name: String,

    /// Category label, e.g. "Goods" or "Super Fast".
    #[serde(rename = "type")]
    pub kind: String,

    /// Average speed as reported by the feed.
    pub average_speed: f64,

    /// Station the train departed from.
    pub departure_station: String,

    /// Expected arrival time, ISO 8601.
    pub expected_arrival_time: String,
}

impl Train {
    /// The category this train belongs to, if its label is one of the fixed four.
    pub fn category(&self) -> Option<TrainCategory> {
        TrainCategory::from_label(&self.kind)
    }

    /// The parsed expected arrival time.
    pub fn expected_arrival(&self) -> Result<DateTime<Utc>, TimeError> {
        parse_arrival(&self.expected_arrival_time)
    }

    /// Average speed formatted for display.
    ///
    /// Integral values print without a fractional part (`80`, not `80.0`).
    pub fn speed_display(&self) -> String {
        self.average_speed.to_string()
    }
}
