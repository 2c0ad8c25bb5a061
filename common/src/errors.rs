//! Application error type shared by every service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Result alias used throughout the workspace.
pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced to API callers.
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more required fields were blank after trimming.
    #[error("{message}")]
    Validation {
        message: String,
        fields: Vec<String>,
    },

    /// Request body failed declarative validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The data store rejected a call or could not be reached.
    #[error("data store error: {0}")]
    Store(String),

    /// The email relay rejected a send or could not be reached.
    #[error("email relay error: {0}")]
    Email(String),

    /// Row not present in the store or the local view.
    #[error("{0} not found")]
    NotFound(String),

    /// Missing or rejected credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// No auth backend is configured.
    #[error("authentication is not available: data store not configured")]
    AuthUnavailable,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable code for client handling.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Email(_) => "EMAIL_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::AuthUnavailable => "AUTH_UNAVAILABLE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Email(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds a validation error for the given blank fields.
    pub fn missing_fields(fields: Vec<String>) -> Self {
        AppError::Validation {
            message: "Please fill all fields correctly.".to_string(),
            fields,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::InvalidRequest(errors.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Store(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "request rejected");
        }

        let body = match &self {
            AppError::Validation { fields, .. } => ApiResponse::error(
                self.code(),
                self.to_string(),
                Some(serde_json::json!({ "fields": fields })),
            ),
            _ => ApiResponse::error(self.code(), self.to_string(), None),
        };

        (status, Json(body)).into_response()
    }
}
