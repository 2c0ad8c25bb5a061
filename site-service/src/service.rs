//! Read paths for the public page.
//!
//! Nothing here fails: a missing or failing store degrades to defaults.

use common::models::{ContactInfo, WorkItem};
use common::Backends;

/// Public content lookups.
pub struct SiteService<'a> {
    backends: &'a Backends,
}

impl<'a> SiteService<'a> {
    pub fn new(backends: &'a Backends) -> Self {
        Self { backends }
    }

    /// Portfolio entries, or none when the store is absent or failing.
    pub async fn work(&self) -> Vec<WorkItem> {
        let Some(store) = &self.backends.store else {
            tracing::debug!("data store not available, no work items");
            return Vec::new();
        };
        match store.list_work().await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(error = %e, "error fetching work items");
                Vec::new()
            }
        }
    }

    /// Contact details, falling back to the built-in defaults.
    pub async fn contact(&self) -> ContactInfo {
        let Some(store) = &self.backends.store else {
            tracing::debug!("data store not available, using default contact info");
            return ContactInfo::default();
        };
        match store.contact_info().await {
            Ok(Some(stored)) => ContactInfo::from_stored(stored),
            Ok(None) => ContactInfo::default(),
            Err(e) => {
                tracing::error!(error = %e, "error fetching contact info");
                ContactInfo::default()
            }
        }
    }
}
