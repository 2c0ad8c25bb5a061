//! Read-only projects listing.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use common::models::Project;
use common::store::DataStore;

pub const LOAD_FAILED: &str = "Failed to load projects.";

/// One listed project with its badge label.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProjectRow {
    #[serde(flatten)]
    pub project: Project,
    pub status_badge: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct ProjectsView {
    pub projects: Vec<ProjectRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Loads the projects table, most recent first.
pub async fn load_projects(store: Option<&Arc<dyn DataStore>>) -> ProjectsView {
    let Some(store) = store else {
        return ProjectsView {
            projects: Vec::new(),
            error: Some(crate::dashboard::STORE_MISSING.to_string()),
        };
    };

    match store.list_projects().await {
        Ok(projects) => ProjectsView {
            projects: projects
                .into_iter()
                .map(|project| ProjectRow {
                    status_badge: project.status_badge().to_string(),
                    project,
                })
                .collect(),
            error: None,
        },
        Err(e) => {
            tracing::error!(error = %e, "error fetching projects");
            ProjectsView {
                projects: Vec::new(),
                error: Some(LOAD_FAILED.to_string()),
            }
        }
    }
}
