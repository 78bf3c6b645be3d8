//! Data transfer objects for JSON responses.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::board::{Board, DisplayRow};
use crate::domain::TrainCategory;
use crate::feed::{FeedFailure, SnapshotView};

/// One category of the board.
#[derive(Debug, Serialize)]
pub struct SectionResult {
    /// Feed label, e.g. "Super Fast"
    pub category: TrainCategory,

    /// On-screen heading, e.g. "Superfast"
    pub heading: &'static str,

    /// Matching trains, in feed order
    pub rows: Vec<DisplayRow>,
}

/// Response for the board endpoint.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// Instant the categories were evaluated at
    pub generated_at: DateTime<Utc>,

    /// When the snapshot was last replaced
    pub updated_at: Option<DateTime<Utc>>,

    /// Whether the last fetch failed
    pub stale: bool,

    /// The last fetch failure, if the feed is currently failing
    pub last_failure: Option<FeedFailure>,

    /// The four categories in fixed order
    pub sections: Vec<SectionResult>,
}

impl BoardResponse {
    pub fn new(board: &Board, snapshot: &SnapshotView) -> Self {
        Self {
            generated_at: board.generated_at(),
            updated_at: snapshot.updated_at,
            stale: snapshot.is_stale(),
            last_failure: snapshot.last_failure.clone(),
            sections: board
                .sections()
                .iter()
                .map(|s| SectionResult {
                    category: s.category,
                    heading: s.category.heading(),
                    rows: s.rows.clone(),
                })
                .collect(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
