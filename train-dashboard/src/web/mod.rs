//! Web layer for the train dashboard.
//!
//! Serves the dashboard page, the board fragment the page refreshes from,
//! and the PDF export.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
