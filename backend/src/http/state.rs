//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::SensorDataRepository;
use crate::services::sessions::SessionRegistry;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of the location and reading tables
    pub repository: Arc<dyn SensorDataRepository>,
    /// Map sessions, one observation store each
    pub sessions: SessionRegistry,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn SensorDataRepository>) -> Self {
        Self {
            repository,
            sessions: SessionRegistry::new(),
        }
    }
}
