//! Admin routes. Everything under `/api/admin` requires a staff session.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use common::middleware::{require_admin, AuthGuard};

use crate::handlers;
use crate::state::AppState;

pub fn router(guard: AuthGuard) -> Router<AppState> {
    let admin = Router::new()
        .route("/api/admin/me", get(handlers::me))
        .route("/api/admin/enquiries", get(handlers::list_enquiries))
        .route(
            "/api/admin/enquiries/{id}",
            get(handlers::enquiry_detail).delete(handlers::delete_enquiry),
        )
        .route(
            "/api/admin/enquiries/{id}/contacted",
            post(handlers::toggle_contacted),
        )
        .route("/api/admin/projects", get(handlers::list_projects))
        .route_layer(middleware::from_fn_with_state(guard, require_admin));

    Router::new()
        .route("/api/login", post(handlers::login))
        .route("/api/health", get(handlers::health_check))
        .merge(admin)
}
