//! Handlers for the public site.

use axum::{
    extract::{Extension, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use common::middleware::RequestId;
use common::models::{ContactInfo, WorkItem};
use common::response::ApiResponse;
use common::{AppError, AppResult};

use crate::content::{ServiceOffering, StudentProject, SERVICES, STUDENT_PROJECTS};
use crate::form::{EnquiryForm, FormSpec, FormValues, SubmissionReceipt};
use crate::service::SiteService;
use crate::state::AppState;
use crate::SERVICE_NAME;

/// Everything the root marketing page renders.
#[derive(Serialize, ToSchema)]
pub struct MarketingPage {
    pub services: Vec<ServiceOffering>,
    pub student_projects: Vec<StudentProject>,
    pub work: Vec<WorkItem>,
    pub contact: ContactInfo,
}

/// Root marketing page
#[utoipa::path(
    get,
    path = "/",
    tag = "site",
    responses(
        (status = 200, description = "Page content", body = ApiResponse<MarketingPage>)
    )
)]
pub async fn marketing_page(State(state): State<AppState>) -> Json<ApiResponse<MarketingPage>> {
    let service = SiteService::new(&state.backends);
    let (work, contact) = tokio::join!(service.work(), service.contact());

    Json(ApiResponse::ok(
        MarketingPage {
            services: SERVICES.to_vec(),
            student_projects: STUDENT_PROJECTS.to_vec(),
            work,
            contact,
        },
        SERVICE_NAME,
    ))
}

/// Portfolio entries
#[utoipa::path(
    get,
    path = "/api/work",
    tag = "site",
    responses(
        (status = 200, description = "Work items (empty when unavailable)", body = ApiResponse<Vec<WorkItem>>)
    )
)]
pub async fn list_work(State(state): State<AppState>) -> Json<ApiResponse<Vec<WorkItem>>> {
    let work = SiteService::new(&state.backends).work().await;
    Json(ApiResponse::ok(work, SERVICE_NAME))
}

/// Contact details
#[utoipa::path(
    get,
    path = "/api/contact",
    tag = "site",
    responses(
        (status = 200, description = "Contact info, defaults when unavailable", body = ApiResponse<ContactInfo>)
    )
)]
pub async fn contact_info(State(state): State<AppState>) -> Json<ApiResponse<ContactInfo>> {
    let contact = SiteService::new(&state.backends).contact().await;
    Json(ApiResponse::ok(contact, SERVICE_NAME))
}

/// Submit the contact-section enquiry form
#[utoipa::path(
    post,
    path = "/api/enquiries",
    tag = "enquiries",
    request_body = FormValues,
    responses(
        (status = 200, description = "Enquiry accepted", body = ApiResponse<SubmissionReceipt>),
        (status = 400, description = "Required field blank"),
        (status = 502, description = "Data store or email relay rejected the submission")
    )
)]
pub async fn submit_enquiry(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(values): Json<FormValues>,
) -> AppResult<Json<ApiResponse<SubmissionReceipt>>> {
    submit(&state, FormSpec::inline(), values, request_id).await
}

/// Submit the project enquiry modal
#[utoipa::path(
    post,
    path = "/api/enquiries/project",
    tag = "enquiries",
    request_body = FormValues,
    responses(
        (status = 200, description = "Enquiry accepted", body = ApiResponse<SubmissionReceipt>),
        (status = 400, description = "Required field blank"),
        (status = 502, description = "Data store or email relay rejected the submission")
    )
)]
pub async fn submit_project_enquiry(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(values): Json<FormValues>,
) -> AppResult<Json<ApiResponse<SubmissionReceipt>>> {
    submit(&state, FormSpec::modal(), values, request_id).await
}

async fn submit(
    state: &AppState,
    spec: FormSpec,
    values: FormValues,
    request_id: RequestId,
) -> AppResult<Json<ApiResponse<SubmissionReceipt>>> {
    let mut form = EnquiryForm::with_values(spec, values);
    let receipt = form.submit(&state.backends).await?;
    Ok(Json(
        ApiResponse::ok(receipt, SERVICE_NAME).with_request_id(request_id.as_str()),
    ))
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
        email_configured: state.backends.email.is_some(),
    })
}

/// Fallback for unknown routes.
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
    pub email_configured: bool,
}
