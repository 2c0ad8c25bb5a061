//! Staff authentication against the hosted auth endpoint (GoTrue).

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};
use crate::store::rest::{error_message, RestEndpoint};

/// An authenticated staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Session issued on login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Session {
    /// Bearer token for the admin endpoints.
    pub access_token: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    pub user: AdminUser,
}

/// Password sign-in and token verification.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchanges credentials for a session.
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session>;

    /// Resolves a bearer token to the user it belongs to.
    async fn verify(&self, access_token: &str) -> AppResult<AdminUser>;
}

/// GoTrue-backed auth sharing the data store's endpoint and key.
#[derive(Debug, Clone)]
pub struct SupabaseAuth {
    endpoint: RestEndpoint,
}

impl SupabaseAuth {
    pub fn new(endpoint: RestEndpoint) -> Self {
        Self { endpoint }
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<Session> {
        let response = self
            .endpoint
            .request(Method::POST, "/auth/v1/token?grant_type=password")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        if response.status().is_client_error() {
            let message = error_message(response).await;
            tracing::info!(email, reason = %message, "login rejected");
            return Err(AppError::Unauthorized("invalid login credentials".to_string()));
        }
        if !response.status().is_success() {
            return Err(AppError::Store(error_message(response).await));
        }

        let session: Session = response.json().await?;
        tracing::info!(user_id = %session.user.id, "staff signed in");
        Ok(session)
    }

    async fn verify(&self, access_token: &str) -> AppResult<AdminUser> {
        let response = self
            .endpoint
            .request_as(Method::GET, "/auth/v1/user", access_token)
            .send()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        if response.status().is_client_error() {
            return Err(AppError::Unauthorized("invalid or expired session".to_string()));
        }
        if !response.status().is_success() {
            return Err(AppError::Store(error_message(response).await));
        }

        Ok(response.json().await?)
    }
}
