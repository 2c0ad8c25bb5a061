//! Application state for the site service.

use common::{AppConfig, Backends};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub backends: Backends,
}

impl AppState {
    pub fn new(config: AppConfig, backends: Backends) -> Self {
        Self { config, backends }
    }
}
