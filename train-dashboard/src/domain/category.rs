//! Train category labels.

use std::fmt;

use serde::Serialize;

/// One of the four fixed train categories shown on the dashboard.
///
/// The label set is closed: a train whose `type` is anything other than one
/// of these exact labels belongs to no category and is never displayed or
/// exported.
///
/// # Examples
///
/// ```
/// use train_dashboard::domain::TrainCategory;
///
/// assert_eq!(TrainCategory::from_label("Super Fast"), Some(TrainCategory::SuperFast));
/// assert_eq!(TrainCategory::from_label("super fast"), None);
/// assert_eq!(TrainCategory::SuperFast.heading(), "Superfast");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrainCategory {
    #[serde(rename = "Goods")]
    Goods,
    #[serde(rename = "Super Fast")]
    SuperFast,
    #[serde(rename = "Passenger")]
    Passenger,
    #[serde(rename = "Express")]
    Express,
}

impl TrainCategory {
    /// Every category, in display and export order.
    pub const ALL: [TrainCategory; 4] = [
        TrainCategory::Goods,
        TrainCategory::SuperFast,
        TrainCategory::Passenger,
        TrainCategory::Express,
    ];

    /// Look up a category by its feed label.
    ///
    /// Matching is exact and case-sensitive.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// The label used by the feed and in exported page titles.
    pub fn label(self) -> &'static str {
        match self {
            TrainCategory::Goods => "Goods",
            TrainCategory::SuperFast => "Super Fast",
            TrainCategory::Passenger => "Passenger",
            TrainCategory::Express => "Express",
        }
    }

    /// The on-screen quadrant heading.
    pub fn heading(self) -> &'static str {
        match self {
            TrainCategory::SuperFast => "Superfast",
            other => other.label(),
        }
    }

    /// Position of this category in [`TrainCategory::ALL`].
    pub fn index(self) -> usize {
        match self {
            TrainCategory::Goods => 0,
            TrainCategory::SuperFast => 1,
            TrainCategory::Passenger => 2,
            TrainCategory::Express => 3,
        }
    }
}

impl fmt::Display for TrainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
