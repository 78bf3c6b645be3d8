//! Display rows shared by the dashboard tables and the PDF export.

use chrono::Local;
use serde::Serialize;

use crate::domain::Train;

/// Column headers, in display order.
pub const COLUMN_HEADERS: [&str; 6] = [
    "Name",
    "Type",
    "Avg Speed",
    "Dept Station",
    "Current Station",
    "ETA",
];

/// Format used for the ETA column (local wall-clock time).
const ETA_FORMAT: &str = "%H:%M:%S";

/// The six display values for one train.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub average_speed: String,
    pub departure_station: String,
    /// The dashboard's own station; the same for every row.
    pub current_station: String,
    pub eta: String,
}

impl DisplayRow {
    /// Build the row for `train` as seen from `current_station`.
    pub fn from_train(train: &Train, current_station: &str) -> Self {
        let eta = train
            .expected_arrival()
            .map(|t| t.with_timezone(&Local).format(ETA_FORMAT).to_string())
            .unwrap_or_default();

        Self {
            name: train.name.clone(),
            kind: train.kind.clone(),
            average_speed: train.speed_display(),
            departure_station: train.departure_station.clone(),
            current_station: current_station.to_string(),
            eta,
        }
    }

    /// Cell values in [`COLUMN_HEADERS`] order.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.kind.as_str(),
            self.average_speed.as_str(),
            self.departure_station.as_str(),
            self.current_station.as_str(),
            self.eta.as_str(),
        ]
    }
}
