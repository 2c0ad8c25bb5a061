//! Site routes.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::marketing_page))
        .route("/api/work", get(handlers::list_work))
        .route("/api/contact", get(handlers::contact_info))
        .route("/api/enquiries", post(handlers::submit_enquiry))
        .route("/api/enquiries/project", post(handlers::submit_project_enquiry))
        .route("/api/health", get(handlers::health_check))
}
