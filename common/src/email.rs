//! Transactional email relay.
//!
//! Enquiries are forwarded through an EmailJS-compatible REST API using a
//! named service/template pair. Without a public key the relay logs and
//! returns success without sending anything.

use async_trait::async_trait;
use serde::Serialize;

use crate::config::{is_real_value, EmailConfig};
use crate::errors::{AppError, AppResult};
use crate::store::rest::error_message;

const SEND_PATH: &str = "/api/v1.0/email/send";

/// Sends form contents through a templated email service.
#[async_trait]
pub trait EmailRelay: Send + Sync {
    /// Sends the field values of one submitted form.
    async fn send_form(
        &self,
        template_params: &serde_json::Map<String, serde_json::Value>,
    ) -> AppResult<()>;
}

/// EmailJS REST relay.
#[derive(Debug, Clone)]
pub struct EmailJsRelay {
    api_url: String,
    service_id: String,
    template_id: String,
    public_key: Option<String>,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a serde_json::Map<String, serde_json::Value>,
}

impl EmailJsRelay {
    /// Builds the relay from config. Returns `None` when the service or
    /// template is missing.
    pub fn from_config(config: &EmailConfig, http: reqwest::Client) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }
        let public_key = config
            .public_key
            .clone()
            .filter(|key| is_real_value(Some(key.as_str())));
        if public_key.is_none() {
            tracing::warn!("EMAILJS_PUBLIC_KEY is not set; enquiry emails will be skipped");
        }

        Some(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            service_id: config.service_id.clone().unwrap_or_default(),
            template_id: config.template_id.clone().unwrap_or_default(),
            public_key,
            http,
        })
    }
}

#[async_trait]
impl EmailRelay for EmailJsRelay {
    async fn send_form(
        &self,
        template_params: &serde_json::Map<String, serde_json::Value>,
    ) -> AppResult<()> {
        let Some(public_key) = self.public_key.as_deref() else {
            tracing::debug!("no public key, email send skipped");
            return Ok(());
        };

        let response = self
            .http
            .post(format!("{}{}", self.api_url, SEND_PATH))
            .json(&SendRequest {
                service_id: &self.service_id,
                template_id: &self.template_id,
                user_id: public_key,
                template_params,
            })
            .send()
            .await
            .map_err(|e| AppError::Email(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Email(error_message(response).await));
        }

        tracing::info!(template = %self.template_id, "enquiry email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};

    async fn fake_relay(status: StatusCode) -> (String, Arc<Mutex<Vec<serde_json::Value>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let app = Router::new().route(
            SEND_PATH,
            post(move |Json(body): Json<serde_json::Value>| {
                let sink = sink.clone();
                async move {
                    sink.lock().unwrap().push(body);
                    status
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), received)
    }

    fn config(api_url: &str, public_key: Option<&str>) -> EmailConfig {
        EmailConfig {
            api_url: api_url.to_string(),
            service_id: Some("service_x".into()),
            template_id: Some("template_y".into()),
            public_key: public_key.map(String::from),
        }
    }

    fn params() -> serde_json::Map<String, serde_json::Value> {
        let mut params = serde_json::Map::new();
        params.insert("name".into(), "Meera".into());
        params
    }

    #[tokio::test]
    async fn test_send_posts_service_template_and_key() {
        let (url, received) = fake_relay(StatusCode::OK).await;
        let relay = EmailJsRelay::from_config(&config(&url, Some("pk_live")), reqwest::Client::new())
            .unwrap();

        relay.send_form(&params()).await.unwrap();

        let bodies = received.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["service_id"], "service_x");
        assert_eq!(bodies[0]["template_id"], "template_y");
        assert_eq!(bodies[0]["user_id"], "pk_live");
        assert_eq!(bodies[0]["template_params"]["name"], "Meera");
    }

    #[tokio::test]
    async fn test_missing_public_key_is_silent_noop() {
        let (url, received) = fake_relay(StatusCode::OK).await;
        let relay = EmailJsRelay::from_config(&config(&url, None), reqwest::Client::new()).unwrap();

        relay.send_form(&params()).await.unwrap();
        assert!(received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_send_is_email_error() {
        let (url, _) = fake_relay(StatusCode::BAD_REQUEST).await;
        let relay = EmailJsRelay::from_config(&config(&url, Some("pk")), reqwest::Client::new())
            .unwrap();

        let err = relay.send_form(&params()).await.unwrap_err();
        assert_eq!(err.code(), "EMAIL_ERROR");
    }

    #[test]
    fn test_unconfigured_service_builds_nothing() {
        let mut cfg = config("http://localhost", Some("pk"));
        cfg.template_id = None;
        assert!(EmailJsRelay::from_config(&cfg, reqwest::Client::new()).is_none());
    }
}
