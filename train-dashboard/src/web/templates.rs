//! Askama templates for the dashboard.

use askama::Template;
use chrono::{DateTime, Local, Utc};

use crate::board::{Board, COLUMN_HEADERS, DisplayRow};
use crate::config::DashboardConfig;
use crate::feed::SnapshotView;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// The full dashboard page.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_station: String,
    pub rendered_at: String,
    pub status: FeedStatusView,
    pub headers: [&'static str; 6],
    pub panes: Vec<PaneView>,
    pub refresh_ms: u128,
    pub scroll_ms: u128,
    pub scroll_step_px: u32,
}

impl DashboardTemplate {
    pub fn new(board: &Board, snapshot: &SnapshotView, config: &DashboardConfig) -> Self {
        Self {
            current_station: config.current_station.clone(),
            rendered_at: board
                .generated_at()
                .with_timezone(&Local)
                .format("%d/%m/%Y, %H:%M:%S")
                .to_string(),
            status: FeedStatusView::from_snapshot(snapshot),
            headers: COLUMN_HEADERS,
            panes: PaneView::from_board(board),
            refresh_ms: config.poll_interval.as_millis(),
            scroll_ms: config.scroll_interval.as_millis(),
            scroll_step_px: config.scroll_step_px,
        }
    }
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Feed status line and the four category tables.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardFragmentTemplate {
    pub status: FeedStatusView,
    pub headers: [&'static str; 6],
    pub panes: Vec<PaneView>,
}

impl BoardFragmentTemplate {
    pub fn new(board: &Board, snapshot: &SnapshotView) -> Self {
        Self {
            status: FeedStatusView::from_snapshot(snapshot),
            headers: COLUMN_HEADERS,
            panes: PaneView::from_board(board),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One quadrant of the dashboard.
#[derive(Debug, Clone)]
pub struct PaneView {
    /// Position of the pane's scroll viewport; the page script addresses
    /// viewports by this index.
    pub index: usize,
    pub heading: &'static str,
    pub rows: Vec<DisplayRow>,
}

impl PaneView {
    /// One pane per board section, in category order.
    pub fn from_board(board: &Board) -> Vec<Self> {
        board
            .sections()
            .iter()
            .map(|section| PaneView {
                index: section.category.index(),
                heading: section.category.heading(),
                rows: section.rows.clone(),
            })
            .collect()
    }
}

/// The feed status line shown above the panes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedStatusView {
    pub text: String,
    pub stale: bool,
}

impl FeedStatusView {
    pub fn from_snapshot(snapshot: &SnapshotView) -> Self {
        let updated = snapshot.updated_at.map(clock_time);

        let text = match (&snapshot.last_failure, updated) {
            (Some(failure), Some(updated)) => format!(
                "Feed unavailable since {} ({}); showing data from {}",
                clock_time(failure.at),
                status_detail(&failure.message),
                updated
            ),
            (Some(failure), None) => format!(
                "Feed unavailable since {} ({})",
                clock_time(failure.at),
                status_detail(&failure.message)
            ),
            (None, Some(updated)) => format!("Last updated {updated}"),
            (None, None) => "Waiting for train data".to_string(),
        };

        Self {
            text,
            stale: snapshot.is_stale(),
        }
    }
}

/// Longest failure detail shown in the status line.
const STATUS_DETAIL_CHARS: usize = 80;

/// Collapse a failure message onto one short line. Upstream error bodies can
/// be whole HTML pages.
fn status_detail(message: &str) -> String {
    let collapsed = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= STATUS_DETAIL_CHARS {
        return collapsed;
    }
    let mut short: String = collapsed.chars().take(STATUS_DETAIL_CHARS - 3).collect();
    short.push_str("...");
    short
}

fn clock_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}
