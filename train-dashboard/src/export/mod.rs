//! PDF export of the dashboard.
//!
//! The export is built straight from a [`Board`](crate::board::Board), not
//! from rendered markup, so it always matches the data the dashboard shows.
//! It has exactly four sections (Goods, Super Fast, Passenger, Express), each
//! starting on its own page.

mod document;
mod error;
mod layout;
mod pdf;

pub use document::{DOCUMENT_TITLE, EXPORT_FILE_NAME, ExportDocument, ExportSection};
pub use error::ExportError;
pub use layout::{PageSpec, layout, paginate, wrap_cell};
pub use pdf::render_pdf;
