//! Authentication guard for the admin routes.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::auth::AuthProvider;
use crate::errors::AppError;

/// State for `require_admin`. With no provider every request is rejected.
#[derive(Clone, Default)]
pub struct AuthGuard {
    pub provider: Option<Arc<dyn AuthProvider>>,
}

impl AuthGuard {
    pub fn new(provider: Option<Arc<dyn AuthProvider>>) -> Self {
        Self { provider }
    }
}

/// Rejects requests without a valid bearer token and stores the resolved
/// `AdminUser` in the request extensions.
pub async fn require_admin(
    State(guard): State<AuthGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let provider = guard.provider.as_ref().ok_or(AppError::AuthUnavailable)?;

    let token = extract_bearer_token(&req)
        .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_string()))?
        .to_string();

    let user = provider.verify(&token).await?;
    tracing::debug!(user_id = %user.id, "admin request authorized");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Extract bearer token from Authorization header.
pub fn extract_bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
