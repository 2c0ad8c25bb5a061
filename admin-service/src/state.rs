//! Application state for the admin service.

use std::sync::Arc;

use common::{AppConfig, Backends};

use crate::dashboard::Dashboards;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub backends: Backends,
    pub dashboards: Arc<Dashboards>,
}

impl AppState {
    pub fn new(config: AppConfig, backends: Backends) -> Self {
        let dashboards = Arc::new(Dashboards::new(backends.store.clone()));
        Self {
            config,
            backends,
            dashboards,
        }
    }
}
