//! Categorised view of the current train snapshot.
//!
//! A [`Board`] is built once per render or export from the snapshot and a
//! single `now` instant, so every section of a page (and every page of an
//! export) agrees on which trains are upcoming.

mod filter;
mod rows;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{Train, TrainCategory};

pub use filter::trains_in_category;
pub use rows::{COLUMN_HEADERS, DisplayRow};

#[cfg(test)]
pub(crate) use filter::test_support;

/// The rows for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSection {
    pub category: TrainCategory,
    pub rows: Vec<DisplayRow>,
}

/// All four categories, in fixed order, evaluated at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    generated_at: DateTime<Utc>,
    sections: [BoardSection; 4],
}

impl Board {
    /// Partition `trains` into the four categories as of `now`.
    pub fn build(trains: &[Train], now: DateTime<Utc>, current_station: &str) -> Self {
        let sections = TrainCategory::ALL.map(|category| BoardSection {
            category,
            rows: trains_in_category(trains, category, now)
                .into_iter()
                .map(|train| DisplayRow::from_train(train, current_station))
                .collect(),
        });

        Self {
            generated_at: now,
            sections,
        }
    }

    /// The instant the board was evaluated at.
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Sections in [`TrainCategory::ALL`] order.
    pub fn sections(&self) -> &[BoardSection] {
        &self.sections
    }

    pub fn section(&self, category: TrainCategory) -> &BoardSection {
        &self.sections[category.index()]
    }
}
