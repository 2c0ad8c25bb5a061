//! Backend handles resolved once at process start.
//!
//! Each handle is `None` when its configuration is absent or a placeholder.
//! Components receive a `Backends` value through service state and never
//! re-read the environment themselves.

use std::sync::Arc;

use crate::auth::{AuthProvider, SupabaseAuth};
use crate::config::AppConfig;
use crate::email::{EmailJsRelay, EmailRelay};
use crate::errors::{AppError, AppResult};
use crate::store::{DataStore, RestEndpoint, RestStore};

/// Data store, email relay and auth handles.
#[derive(Clone, Default)]
pub struct Backends {
    pub store: Option<Arc<dyn DataStore>>,
    pub email: Option<Arc<dyn EmailRelay>>,
    pub auth: Option<Arc<dyn AuthProvider>>,
}

impl Backends {
    /// Builds every configured backend from `config`.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("failed to create HTTP client: {e}")))?;

        let mut backends = Self::default();

        match (&config.store.url, &config.store.anon_key) {
            (Some(url), Some(key)) if config.store.is_configured() => {
                let endpoint = RestEndpoint::new(url, key, http.clone());
                backends.store = Some(Arc::new(RestStore::new(endpoint.clone())));
                backends.auth = Some(Arc::new(SupabaseAuth::new(endpoint)));
            }
            _ => tracing::warn!("data store not configured; running without persistence"),
        }

        match EmailJsRelay::from_config(&config.email, http) {
            Some(relay) => backends.email = Some(Arc::new(relay)),
            None => tracing::warn!("email relay not configured; enquiries will not be emailed"),
        }

        tracing::info!(
            store = backends.store.is_some(),
            email = backends.email.is_some(),
            "backends resolved"
        );
        Ok(backends)
    }

    /// Replaces the data store handle.
    pub fn with_store(mut self, store: Arc<dyn DataStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replaces the email relay handle.
    pub fn with_email(mut self, email: Arc<dyn EmailRelay>) -> Self {
        self.email = Some(email);
        self
    }

    /// Replaces the auth handle.
    pub fn with_auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// True when no submission backend is configured (development mode).
    pub fn is_development(&self) -> bool {
        self.store.is_none() && self.email.is_none()
    }
}
