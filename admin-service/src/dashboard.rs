//! Enquiry triage dashboard.
//!
//! Each signed-in staff member gets their own list of enquiries, keyed by
//! user id. Mutations are applied to that list first and then sent to the
//! store:
//!
//! - toggling `contacted` reverts the local flag if the store rejects it;
//! - deleting re-fetches the whole list if the store rejects it.
//!
//! Two mutations on the same row are not coordinated; whichever store write
//! lands last wins.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use common::auth::AdminUser;
use common::models::{Enquiry, StatusFilter};
use common::store::DataStore;
use common::{AppError, AppResult};

use crate::optimistic::Tentative;

pub const LOAD_FAILED: &str = "Failed to load enquiries.";
pub const TOGGLE_FAILED: &str = "Failed to update contacted status.";
pub const DELETE_FAILED: &str = "Failed to delete enquiry.";
pub const STORE_MISSING: &str = "Data store is not configured.";

/// What the dashboard currently shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct DashboardView {
    /// Filter used by the last load.
    pub filter: StatusFilter,
    /// Rows, most recent first.
    pub enquiries: Vec<Enquiry>,
    /// Error banner; stays until the next successful load.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DashboardView {
    fn position(&self, id: &str) -> Option<usize> {
        self.enquiries.iter().position(|e| e.id == id)
    }

    /// Flips `contacted` and returns the previous value.
    fn flip_contacted(&mut self, id: &str) -> Option<bool> {
        let idx = self.position(id)?;
        let row = &mut self.enquiries[idx];
        let previous = row.contacted;
        row.contacted = !previous;
        Some(previous)
    }

    fn set_contacted(&mut self, id: &str, contacted: bool) {
        if let Some(idx) = self.position(id) {
            self.enquiries[idx].contacted = contacted;
        }
    }

    fn remove(&mut self, id: &str) -> Option<Enquiry> {
        let idx = self.position(id)?;
        Some(self.enquiries.remove(idx))
    }
}

/// Dashboards of every staff member seen by this process.
pub struct Dashboards {
    store: Option<Arc<dyn DataStore>>,
    sessions: RwLock<HashMap<String, Arc<Dashboard>>>,
}

impl Dashboards {
    pub fn new(store: Option<Arc<dyn DataStore>>) -> Self {
        Self {
            store,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// The dashboard of `user`, created empty on first use.
    pub async fn for_user(&self, user: &AdminUser) -> Arc<Dashboard> {
        if let Some(dashboard) = self.sessions.read().await.get(&user.id) {
            return dashboard.clone();
        }
        self.sessions
            .write()
            .await
            .entry(user.id.clone())
            .or_insert_with(|| Arc::new(Dashboard::new(self.store.clone())))
            .clone()
    }
}

/// One staff member's dashboard plus its store handle.
pub struct Dashboard {
    store: Option<Arc<dyn DataStore>>,
    view: RwLock<DashboardView>,
    loaded: AtomicBool,
}

impl Dashboard {
    pub fn new(store: Option<Arc<dyn DataStore>>) -> Self {
        Self {
            store,
            view: RwLock::new(DashboardView::default()),
            loaded: AtomicBool::new(false),
        }
    }

    /// Current view.
    pub async fn snapshot(&self) -> DashboardView {
        self.view.read().await.clone()
    }

    /// Full content of one row, as held locally.
    pub async fn detail(&self, id: &str) -> AppResult<Enquiry> {
        self.ensure_loaded().await;
        self.view
            .read()
            .await
            .enquiries
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("enquiry {id}")))
    }

    /// Re-queries the store with `filter`.
    ///
    /// A failed query empties the list and raises the banner; it is not an
    /// error for the caller.
    pub async fn load(&self, filter: StatusFilter) -> DashboardView {
        let fetched = match &self.store {
            Some(store) => store.list_enquiries(filter).await.map_err(|e| {
                tracing::error!(%filter, error = %e, "error fetching enquiries");
                LOAD_FAILED
            }),
            None => Err(STORE_MISSING),
        };

        let mut view = self.view.write().await;
        view.filter = filter;
        match fetched {
            Ok(enquiries) => {
                tracing::debug!(%filter, count = enquiries.len(), "enquiries loaded");
                view.enquiries = enquiries;
                view.error = None;
            }
            Err(banner) => {
                view.enquiries.clear();
                view.error = Some(banner.to_string());
            }
        }
        self.loaded.store(true, Ordering::Release);
        view.clone()
    }

    /// Loads with the current filter unless a load already happened.
    async fn ensure_loaded(&self) {
        if !self.loaded.load(Ordering::Acquire) {
            let filter = self.view.read().await.filter;
            self.load(filter).await;
        }
    }

    /// Flips `contacted` on one row. Returns the new value.
    pub async fn toggle_contacted(&self, id: &str) -> AppResult<bool> {
        let store = self.store()?;
        self.ensure_loaded().await;

        let tentative = Tentative::apply(&self.view, |view| view.flip_contacted(id)).await;
        let Some(previous) = *tentative.undo() else {
            return Err(AppError::NotFound(format!("enquiry {id}")));
        };

        let result = store.set_contacted(id, !previous).await;
        tentative
            .settle(&self.view, result, |view, previous| {
                if let Some(previous) = previous {
                    view.set_contacted(id, previous);
                }
                view.error = Some(TOGGLE_FAILED.to_string());
            })
            .await
            .inspect_err(|e| tracing::error!(id, error = %e, "error updating contacted status"))?;

        tracing::info!(id, contacted = !previous, "enquiry contacted status updated");
        Ok(!previous)
    }

    /// Removes one row locally, then from the store.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let store = self.store()?;
        self.ensure_loaded().await;

        let tentative = Tentative::apply(&self.view, |view| view.remove(id)).await;
        if tentative.undo().is_none() {
            return Err(AppError::NotFound(format!("enquiry {id}")));
        }

        match store.delete_enquiry(id).await {
            Ok(()) => {
                tentative.commit();
                tracing::info!(id, "enquiry deleted");
                Ok(())
            }
            Err(e) => {
                tracing::error!(id, error = %e, "error deleting enquiry, reloading list");
                // The row is restored by a full reload rather than re-inserted.
                tentative.revert(&self.view, |_, _| {}).await;
                let filter = self.view.read().await.filter;
                self.load(filter).await;
                self.view.write().await.error = Some(DELETE_FAILED.to_string());
                Err(e)
            }
        }
    }

    fn store(&self) -> AppResult<&Arc<dyn DataStore>> {
        self.store
            .as_ref()
            .ok_or_else(|| AppError::Store(STORE_MISSING.to_string()))
    }
}
