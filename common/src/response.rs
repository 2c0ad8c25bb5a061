//! JSON envelope shared by the site and admin services.
//!
//! Successful calls carry `data`, failed ones carry `error`; both carry
//! `meta`. Failures are produced by `AppError`'s `IntoResponse` impl.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    pub meta: ResponseMeta,
}

/// Machine-readable code plus a message fit for the enquiry form banner.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// e.g. "VALIDATION_ERROR", "STORE_ERROR", "UNAUTHORIZED".
    pub code: String,
    pub message: String,
    /// For validation failures: `{"fields": [...]}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResponseMeta {
    /// Echo of the `x-request-id` header, set on enquiry submissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl ResponseMeta {
    fn now(service: Option<String>) -> Self {
        Self {
            request_id: None,
            timestamp: Utc::now(),
            service,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Success envelope tagged with the service that answered.
    pub fn ok(data: T, service: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: ResponseMeta::now(Some(service.into())),
        }
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.meta.request_id = Some(request_id.into());
        self
    }
}

impl ApiResponse<()> {
    /// Failure envelope.
    pub fn error(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                code: code.into(),
                message: message.into(),
                details,
            }),
            meta: ResponseMeta::now(None),
        }
    }
}
