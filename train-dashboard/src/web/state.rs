//! Application state for the web layer.

use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::feed::TrainSnapshot;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Train list kept current by the poller
    pub snapshot: TrainSnapshot,

    /// Dashboard settings
    pub config: Arc<DashboardConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(snapshot: TrainSnapshot, config: DashboardConfig) -> Self {
        Self {
            snapshot,
            config: Arc::new(config),
        }
    }
}
