//! Handlers for the admin API.

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::auth::{AdminUser, Session};
use common::models::{Enquiry, StatusFilter};
use common::response::ApiResponse;
use common::{AppError, AppResult};

use crate::dashboard::DashboardView;
use crate::projects::{load_projects, ProjectsView};
use crate::state::AppState;
use crate::SERVICE_NAME;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EnquiryQuery {
    /// newest (default), unresolved or resolved.
    pub filter: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactedUpdate {
    pub id: String,
    pub contacted: bool,
}

/// Staff login
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = ApiResponse<Session>),
        (status = 400, description = "Malformed credentials"),
        (status = 401, description = "Wrong email or password"),
        (status = 503, description = "Auth backend not configured")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<Session>>> {
    req.validate()?;

    let auth = state.backends.auth.as_ref().ok_or(AppError::AuthUnavailable)?;
    let session = auth.sign_in(req.email.trim(), &req.password).await?;

    // Start every session from a fresh list.
    state
        .dashboards
        .for_user(&session.user)
        .await
        .load(StatusFilter::Newest)
        .await;

    Ok(Json(ApiResponse::ok(session, SERVICE_NAME)))
}

/// Current staff member
#[utoipa::path(
    get,
    path = "/api/admin/me",
    tag = "auth",
    responses(
        (status = 200, description = "Signed-in user", body = ApiResponse<AdminUser>),
        (status = 401, description = "Missing or invalid session")
    )
)]
pub async fn me(Extension(user): Extension<AdminUser>) -> Json<ApiResponse<AdminUser>> {
    Json(ApiResponse::ok(user, SERVICE_NAME))
}

/// List enquiries with a status filter
#[utoipa::path(
    get,
    path = "/api/admin/enquiries",
    tag = "enquiries",
    params(EnquiryQuery),
    responses(
        (status = 200, description = "Dashboard view, with a banner if loading failed", body = ApiResponse<DashboardView>),
        (status = 400, description = "Unknown filter"),
        (status = 401, description = "Missing or invalid session")
    )
)]
pub async fn list_enquiries(
    State(state): State<AppState>,
    Extension(user): Extension<AdminUser>,
    Query(query): Query<EnquiryQuery>,
) -> AppResult<Json<ApiResponse<DashboardView>>> {
    let filter = match query.filter.as_deref() {
        Some(raw) => raw.parse::<StatusFilter>().map_err(AppError::InvalidRequest)?,
        None => StatusFilter::default(),
    };

    let view = state.dashboards.for_user(&user).await.load(filter).await;
    Ok(Json(ApiResponse::ok(view, SERVICE_NAME)))
}

/// Full detail of one listed enquiry
#[utoipa::path(
    get,
    path = "/api/admin/enquiries/{id}",
    tag = "enquiries",
    params(("id" = String, Path, description = "Enquiry id")),
    responses(
        (status = 200, description = "Enquiry detail", body = ApiResponse<Enquiry>),
        (status = 404, description = "Not in the current list")
    )
)]
pub async fn enquiry_detail(
    State(state): State<AppState>,
    Extension(user): Extension<AdminUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Enquiry>>> {
    let enquiry = state.dashboards.for_user(&user).await.detail(&id).await?;
    Ok(Json(ApiResponse::ok(enquiry, SERVICE_NAME)))
}

/// Toggle the contacted flag
#[utoipa::path(
    post,
    path = "/api/admin/enquiries/{id}/contacted",
    tag = "enquiries",
    params(("id" = String, Path, description = "Enquiry id")),
    responses(
        (status = 200, description = "New flag value", body = ApiResponse<ContactedUpdate>),
        (status = 404, description = "Not in the current list"),
        (status = 502, description = "Store rejected the update; the flag was reverted")
    )
)]
pub async fn toggle_contacted(
    State(state): State<AppState>,
    Extension(user): Extension<AdminUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<ContactedUpdate>>> {
    let dashboard = state.dashboards.for_user(&user).await;
    let contacted = dashboard.toggle_contacted(&id).await?;
    Ok(Json(ApiResponse::ok(
        ContactedUpdate { id, contacted },
        SERVICE_NAME,
    )))
}

/// Delete an enquiry
#[utoipa::path(
    delete,
    path = "/api/admin/enquiries/{id}",
    tag = "enquiries",
    params(("id" = String, Path, description = "Enquiry id")),
    responses(
        (status = 200, description = "Remaining rows", body = ApiResponse<DashboardView>),
        (status = 404, description = "Not in the current list"),
        (status = 502, description = "Store rejected the delete; the list was reloaded")
    )
)]
pub async fn delete_enquiry(
    State(state): State<AppState>,
    Extension(user): Extension<AdminUser>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<DashboardView>>> {
    let dashboard = state.dashboards.for_user(&user).await;
    dashboard.delete(&id).await?;
    let view = dashboard.snapshot().await;
    Ok(Json(ApiResponse::ok(view, SERVICE_NAME)))
}

/// List projects
#[utoipa::path(
    get,
    path = "/api/admin/projects",
    tag = "projects",
    responses(
        (status = 200, description = "Projects, with a banner if loading failed", body = ApiResponse<ProjectsView>),
        (status = 401, description = "Missing or invalid session")
    )
)]
pub async fn list_projects(State(state): State<AppState>) -> Json<ApiResponse<ProjectsView>> {
    let view = load_projects(state.backends.store.as_ref()).await;
    Json(ApiResponse::ok(view, SERVICE_NAME))
}

/// Health check
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        store_configured: state.backends.store.is_some(),
        auth_configured: state.backends.auth.is_some(),
    })
}

pub async fn not_found() -> AppError {
    AppError::NotFound("page".to_string())
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub store_configured: bool,
    pub auth_configured: bool,
}
