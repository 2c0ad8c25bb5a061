//! Remote data store access.
//!
//! `DataStore` is the seam the services depend on; `RestStore` talks to the
//! hosted PostgREST endpoint. When the store is not configured the services
//! hold no handle at all (see `Backends`).

pub mod query;
pub mod rest;

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{Enquiry, NewEnquiry, Project, StatusFilter, StoredContact, WorkItem};

pub use query::Select;
pub use rest::{RestEndpoint, RestStore};

/// Row-level operations on the tables this system uses.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Enquiries, most recent first, optionally constrained by `contacted`.
    async fn list_enquiries(&self, filter: StatusFilter) -> AppResult<Vec<Enquiry>>;

    /// Inserts one enquiry row.
    async fn insert_enquiry(&self, enquiry: &NewEnquiry) -> AppResult<()>;

    /// Sets the `contacted` flag of one enquiry.
    async fn set_contacted(&self, id: &str, contacted: bool) -> AppResult<()>;

    /// Deletes one enquiry.
    async fn delete_enquiry(&self, id: &str) -> AppResult<()>;

    /// Admin projects, most recent first.
    async fn list_projects(&self) -> AppResult<Vec<Project>>;

    /// Public portfolio entries.
    async fn list_work(&self) -> AppResult<Vec<WorkItem>>;

    /// The singleton contact row, if one exists.
    async fn contact_info(&self) -> AppResult<Option<StoredContact>>;
}
