//! Admin-side project rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::id::deserialize_id;

/// Table listed by the admin projects page.
pub const PROJECTS_TABLE: &str = "projects";

/// A project managed outside this system; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Active or not.
    #[serde(default)]
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Badge label shown next to the project.
    pub fn status_badge(&self) -> &'static str {
        if self.status {
            "Active"
        } else {
            "Inactive"
        }
    }
}
