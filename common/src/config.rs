//! Service configuration.
//!
//! Every setting comes from the environment (optionally seeded from a `.env`
//! file). Missing or placeholder backend settings are not an error: the
//! corresponding backend is simply treated as unconfigured.

use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_EMAIL_API_URL: &str = "https://api.emailjs.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Marker used by sample `.env` files, e.g. `https://your-project.supabase.co`.
const PLACEHOLDER_MARKER: &str = "your-";

/// Top-level configuration shared by all services.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Name of the service that loaded this config.
    pub service_name: String,
    /// Bind host.
    pub host: String,
    /// Bind port (overridden per service from `SERVER_PORT`).
    pub port: u16,
    /// Timeout applied to every outbound request.
    pub request_timeout: Duration,
    /// Hosted data store settings.
    pub store: StoreConfig,
    /// Email relay settings.
    pub email: EmailConfig,
}

/// Settings for the hosted data store (PostgREST + GoTrue).
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Project endpoint, e.g. `https://abc.supabase.co`.
    pub url: Option<String>,
    /// Anonymous access key.
    pub anon_key: Option<String>,
}

/// Settings for the transactional email relay.
#[derive(Debug, Clone, Default)]
pub struct EmailConfig {
    /// Relay API base URL.
    pub api_url: String,
    /// Service identifier.
    pub service_id: Option<String>,
    /// Template identifier.
    pub template_id: Option<String>,
    /// Public key. Absent means sends are skipped.
    pub public_key: Option<String>,
}

impl AppConfig {
    /// Loads configuration for the named service.
    ///
    /// `.env` is read first (best effort); variables already present in the
    /// process environment win.
    pub fn load_with_service(service_name: &str) -> Self {
        if dotenvy::dotenv().is_ok() {
            tracing::debug!(service = service_name, "loaded .env file");
        }

        Self {
            service_name: service_name.to_string(),
            host: env_string("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: 0,
            request_timeout: Duration::from_secs(
                env_string("REQUEST_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            store: StoreConfig {
                url: env_string("SUPABASE_URL"),
                anon_key: env_string("SUPABASE_ANON_KEY"),
            },
            email: EmailConfig {
                api_url: env_string("EMAILJS_API_URL")
                    .unwrap_or_else(|| DEFAULT_EMAIL_API_URL.to_string()),
                service_id: env_string("EMAILJS_SERVICE_ID"),
                template_id: env_string("EMAILJS_TEMPLATE_ID"),
                public_key: env_string("EMAILJS_PUBLIC_KEY"),
            },
        }
    }

    /// Reads `SERVER_PORT`, falling back to the service default.
    pub fn with_port_from_env(mut self, default_port: u16) -> Self {
        self.port = env_string("SERVER_PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(default_port);
        self
    }

    /// `host:port` bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StoreConfig {
    /// Whether both the endpoint and key are present and not placeholders.
    pub fn is_configured(&self) -> bool {
        is_real_value(self.url.as_deref()) && is_real_value(self.anon_key.as_deref())
    }
}

impl EmailConfig {
    /// Whether the service/template pair is usable.
    ///
    /// The public key is deliberately not part of this check: a relay with
    /// no key is still "configured" but turns every send into a no-op.
    pub fn is_configured(&self) -> bool {
        is_real_value(self.service_id.as_deref()) && is_real_value(self.template_id.as_deref())
    }
}

/// True for a non-empty value that is not a sample placeholder.
pub fn is_real_value(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        Some(v) => !v.is_empty() && !v.contains(PLACEHOLDER_MARKER),
        None => false,
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
