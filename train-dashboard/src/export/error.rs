//! Export error types.

/// Errors that can occur while producing the PDF export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The PDF library rejected the document
    #[error("PDF error: {message}")]
    Pdf { message: String },
}
