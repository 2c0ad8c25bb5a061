//! Public marketing site service.
//!
//! Serves the root page content, portfolio and contact details, and
//! accepts enquiries from the contact form and the project enquiry modal.
//! The enquiry form component in [`form`] is usable on its own; the HTTP
//! handlers drive one submission per request.

pub mod content;
pub mod form;
pub mod handlers;
pub mod routes;
pub mod service;
pub mod state;

#[cfg(test)]
mod testing;

use axum::{middleware, routing::get, Json, Router};
use common::middleware::request_id_middleware;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub use state::AppState;

pub const SERVICE_NAME: &str = "site-service";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agency site API",
        version = "0.1.0",
        description = "Public marketing site and enquiry capture"
    ),
    paths(
        handlers::marketing_page,
        handlers::list_work,
        handlers::contact_info,
        handlers::submit_enquiry,
        handlers::submit_project_enquiry,
        handlers::health_check,
    ),
    components(schemas(
        common::models::ContactInfo,
        common::models::WorkItem,
        form::FormValues,
        form::Presentation,
        form::SubmissionReceipt,
        content::ServiceOffering,
        content::StudentProject,
        handlers::MarketingPage,
        handlers::HealthResponse,
    )),
    tags(
        (name = "site", description = "Public page content"),
        (name = "enquiries", description = "Enquiry submission"),
        (name = "health", description = "Health check")
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingRelay, RecordingStore};
    use common::{AppConfig, Backends};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_config() -> AppConfig {
        AppConfig {
            service_name: SERVICE_NAME.to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout: Duration::from_secs(5),
            store: Default::default(),
            email: Default::default(),
        }
    }

    fn app(backends: Backends) -> Router {
        create_router(AppState::new(test_config(), backends))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_project_enquiry_is_stored_and_emailed() {
        let store = Arc::new(RecordingStore::default());
        let relay = Arc::new(RecordingRelay::default());
        let backends = Backends::default()
            .with_store(store.clone())
            .with_email(relay.clone());

        let (status, body) = send(
            app(backends),
            post_json(
                "/api/enquiries/project",
                serde_json::json!({
                    "name": "Kiran",
                    "email": "kiran@example.com",
                    "phone": "98765",
                    "projectTitle": "Inventory tool",
                    "message": "Looking for a quote"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["stored"], true);
        assert_eq!(body["data"]["emailed"], true);
        assert_eq!(body["data"]["presentation"], "modal");
        assert_eq!(body["data"]["overlay_ms"], 2000);
        assert!(body["meta"]["request_id"].is_string());
        assert_eq!(store.inserted()[0].project_title.as_deref(), Some("Inventory tool"));
    }

    #[tokio::test]
    async fn test_blank_field_is_rejected_with_field_list() {
        let store = Arc::new(RecordingStore::default());
        let (status, body) = send(
            app(Backends::default().with_store(store.clone())),
            post_json(
                "/api/enquiries",
                serde_json::json!({
                    "name": "Kiran",
                    "email": "  ",
                    "phone": "98765",
                    "message": "hi"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"]["fields"], serde_json::json!(["email"]));
        assert!(store.inserted().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_bad_gateway() {
        let (status, body) = send(
            app(Backends::default().with_store(Arc::new(RecordingStore::failing()))),
            post_json(
                "/api/enquiries",
                serde_json::json!({
                    "name": "A", "email": "a@b.c", "phone": "1", "message": "m"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "STORE_ERROR");
    }

    #[tokio::test]
    async fn test_root_page_renders_without_backends() {
        let (status, body) = send(
            app(Backends::default()),
            Request::builder().uri("/").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["services"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"]["work"], serde_json::json!([]));
        assert_eq!(body["data"]["contact"]["email"], "hello@dezacodex.in");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, body) = send(
            app(Backends::default()),
            Request::builder().uri("/pricing").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
