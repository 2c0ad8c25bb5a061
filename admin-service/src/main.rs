//! Staff admin service.
//!
//! Password login plus the enquiry triage dashboard and the projects
//! listing. Every `/api/admin` route needs the bearer token issued by login.

mod dashboard;
mod handlers;
mod optimistic;
mod projects;
mod routes;
mod state;

#[cfg(test)]
mod testing;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use common::middleware::{request_id_middleware, AuthGuard};
use common::{AppConfig, Backends};
use state::AppState;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;

pub(crate) const SERVICE_NAME: &str = "admin-service";
const DEFAULT_PORT: u16 = 8081;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agency admin API",
        version = "0.1.0",
        description = "Staff login, enquiry dashboard and projects"
    ),
    paths(
        handlers::login,
        handlers::me,
        handlers::list_enquiries,
        handlers::enquiry_detail,
        handlers::toggle_contacted,
        handlers::delete_enquiry,
        handlers::list_projects,
        handlers::health_check,
    ),
    components(schemas(
        common::auth::AdminUser,
        common::auth::Session,
        common::models::Enquiry,
        common::models::StatusFilter,
        common::models::Project,
        dashboard::DashboardView,
        projects::ProjectsView,
        projects::ProjectRow,
        handlers::LoginRequest,
        handlers::ContactedUpdate,
        handlers::HealthResponse,
    )),
    tags(
        (name = "auth", description = "Staff sessions"),
        (name = "enquiries", description = "Enquiry dashboard"),
        (name = "projects", description = "Projects listing"),
        (name = "health", description = "Health check")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::load_with_service(SERVICE_NAME).with_port_from_env(DEFAULT_PORT);
    let backends = Backends::from_config(&config).context("failed to build backends")?;
    if backends.auth.is_none() {
        tracing::warn!("auth backend not configured; admin routes will answer 503");
    }

    let addr = config.bind_address();
    let app = create_router(AppState::new(config, backends));

    info!(service = SERVICE_NAME, address = %addr, "starting admin service");

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let guard = AuthGuard::new(state.backends.auth.clone());

    Router::new()
        .merge(routes::router(guard))
        .route("/api-docs/openapi.json", get(openapi_json))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
