//! Export document model.

use crate::board::{Board, DisplayRow};
use crate::domain::TrainCategory;

/// Heading printed on the first page.
pub const DOCUMENT_TITLE: &str = "Trains List";

/// File name offered to the browser.
pub const EXPORT_FILE_NAME: &str = "trains_list.pdf";

/// One category's part of the export. Each section starts on a new page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSection {
    pub category: TrainCategory,
    pub title: String,
    pub rows: Vec<DisplayRow>,
}

/// The full export: always four sections in category order, empty or not.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    title: String,
    sections: [ExportSection; 4],
}

impl ExportDocument {
    /// Build the export from an evaluated board.
    pub fn from_board(board: &Board) -> Self {
        let sections = TrainCategory::ALL.map(|category| ExportSection {
            category,
            title: format!("{} Trains", category.label()),
            rows: board.section(category).rows.clone(),
        });

        Self {
            title: DOCUMENT_TITLE.to_string(),
            sections,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> &[ExportSection] {
        &self.sections
    }
}
