//! PostgREST client for the hosted data store.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::query::{eq_filter, Select};
use super::DataStore;
use crate::errors::{AppError, AppResult};
use crate::models::contact::CONTACT_TABLE;
use crate::models::enquiry::ENQUIRIES_TABLE;
use crate::models::project::PROJECTS_TABLE;
use crate::models::work::WORK_TABLE;
use crate::models::{Enquiry, NewEnquiry, Project, StatusFilter, StoredContact, WorkItem};

/// Base URL, key and HTTP client shared by the store and auth clients.
#[derive(Clone)]
pub struct RestEndpoint {
    base_url: String,
    key: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for RestEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestEndpoint")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RestEndpoint {
    pub fn new(base_url: &str, key: &str, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            key: key.to_string(),
            http,
        }
    }

    /// Request against `{base_url}{path}` carrying the project key.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    /// Like `request`, but authorized as the given user session.
    pub fn request_as(&self, method: Method, path: &str, access_token: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.key)
            .bearer_auth(access_token)
    }
}

/// Error body returned by PostgREST and GoTrue.
#[derive(Debug, Default, Deserialize)]
struct RemoteError {
    #[serde(default, alias = "error_description", alias = "msg")]
    message: Option<String>,
}

/// Turns a non-2xx response into a message carrying the remote explanation.
pub(crate) async fn error_message(response: Response) -> String {
    let status = response.status();
    let body: RemoteError = response.json().await.unwrap_or_default();
    match body.message {
        Some(message) => format!("{status}: {message}"),
        None => status.to_string(),
    }
}

async fn check(response: Response) -> AppResult<Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(AppError::Store(error_message(response).await))
    }
}

/// Data store backed by a PostgREST endpoint.
#[derive(Debug, Clone)]
pub struct RestStore {
    endpoint: RestEndpoint,
}

impl RestStore {
    pub fn new(endpoint: RestEndpoint) -> Self {
        Self { endpoint }
    }

    fn table_path(table: &str) -> String {
        format!("/rest/v1/{table}")
    }

    /// Selects rows from `table`.
    pub async fn select<T: DeserializeOwned>(&self, table: &str, select: &Select) -> AppResult<Vec<T>> {
        let response = self
            .endpoint
            .request(Method::GET, &Self::table_path(table))
            .query(&select.to_query_pairs())
            .send()
            .await?;

        let rows = check(response).await?.json::<Vec<T>>().await?;
        tracing::debug!(table, rows = rows.len(), "select completed");
        Ok(rows)
    }

    /// Inserts rows into `table` without reading them back.
    pub async fn insert<T: Serialize + Sync>(&self, table: &str, rows: &[T]) -> AppResult<()> {
        let response = self
            .endpoint
            .request(Method::POST, &Self::table_path(table))
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await?;

        check(response).await?;
        tracing::debug!(table, rows = rows.len(), "insert completed");
        Ok(())
    }

    /// Applies `patch` to the rows where `column = value`.
    pub async fn update(
        &self,
        table: &str,
        column: &str,
        value: &str,
        patch: &serde_json::Value,
    ) -> AppResult<()> {
        let response = self
            .endpoint
            .request(Method::PATCH, &Self::table_path(table))
            .header("Prefer", "return=minimal")
            .query(&eq_filter(column, value))
            .json(patch)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Deletes the rows where `column = value`.
    pub async fn delete(&self, table: &str, column: &str, value: &str) -> AppResult<()> {
        let response = self
            .endpoint
            .request(Method::DELETE, &Self::table_path(table))
            .query(&eq_filter(column, value))
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl DataStore for RestStore {
    async fn list_enquiries(&self, filter: StatusFilter) -> AppResult<Vec<Enquiry>> {
        let mut select = Select::all().order("created_at", false);
        if let Some(contacted) = filter.contacted() {
            select = select.eq("contacted", contacted);
        }
        self.select(ENQUIRIES_TABLE, &select).await
    }

    async fn insert_enquiry(&self, enquiry: &NewEnquiry) -> AppResult<()> {
        self.insert(ENQUIRIES_TABLE, std::slice::from_ref(enquiry)).await
    }

    async fn set_contacted(&self, id: &str, contacted: bool) -> AppResult<()> {
        self.update(
            ENQUIRIES_TABLE,
            "id",
            id,
            &serde_json::json!({ "contacted": contacted }),
        )
        .await
    }

    async fn delete_enquiry(&self, id: &str) -> AppResult<()> {
        self.delete(ENQUIRIES_TABLE, "id", id).await
    }

    async fn list_projects(&self) -> AppResult<Vec<Project>> {
        self.select(PROJECTS_TABLE, &Select::all().order("created_at", false))
            .await
    }

    async fn list_work(&self) -> AppResult<Vec<WorkItem>> {
        self.select(WORK_TABLE, &Select::all()).await
    }

    async fn contact_info(&self) -> AppResult<Option<StoredContact>> {
        let rows: Vec<StoredContact> = self
            .select(
                CONTACT_TABLE,
                &Select::columns("email,phone,location").limit(1),
            )
            .await?;
        Ok(rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::get,
        Json, Router,
    };
    use std::collections::HashMap;

    /// Serves a fake PostgREST `enquiries` table on an ephemeral port.
    async fn fake_postgrest() -> String {
        async fn list(
            headers: HeaderMap,
            Query(params): Query<HashMap<String, String>>,
        ) -> Result<Json<serde_json::Value>, StatusCode> {
            if headers.get("apikey").and_then(|v| v.to_str().ok()) != Some("anon") {
                return Err(StatusCode::UNAUTHORIZED);
            }
            assert_eq!(params.get("order").map(String::as_str), Some("created_at.desc"));
            let contacted = params.get("contacted").map(String::as_str) == Some("eq.true");
            Ok(Json(serde_json::json!([{
                "id": "e-1",
                "name": "Ravi",
                "email": "ravi@example.com",
                "phone": "123",
                "message": "hello",
                "created_at": "2024-06-01T00:00:00+00:00",
                "contacted": contacted
            }])))
        }

        async fn reject() -> (StatusCode, Json<serde_json::Value>) {
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "message": "permission denied" })),
            )
        }

        let app = Router::new().route(
            "/rest/v1/enquiries",
            get(list).patch(reject).delete(|| async { StatusCode::NO_CONTENT }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn store(base_url: &str) -> RestStore {
        RestStore::new(RestEndpoint::new(base_url, "anon", reqwest::Client::new()))
    }

    #[tokio::test]
    async fn test_list_enquiries_sends_filter_and_order() {
        let base = fake_postgrest().await;
        let rows = store(&base).list_enquiries(StatusFilter::Resolved).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contacted);
    }

    #[tokio::test]
    async fn test_rejected_update_carries_remote_message() {
        let base = fake_postgrest().await;
        let err = store(&base).set_contacted("e-1", true).await.unwrap_err();
        assert!(matches!(&err, AppError::Store(msg) if msg.contains("permission denied")));
    }

    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let base = fake_postgrest().await;
        assert!(store(&base).delete_enquiry("e-1").await.is_ok());
    }
}
