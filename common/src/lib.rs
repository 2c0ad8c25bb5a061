//! Shared building blocks for the agency site services.
//!
//! - `config`: environment-driven configuration, resolved once at startup
//! - `backends`: data store and email relay handles built from that config
//! - `store` / `email` / `auth`: REST clients for the hosted collaborators
//! - `models`, `response`, `errors`, `middleware`: the HTTP surface

pub mod auth;
pub mod backends;
pub mod config;
pub mod email;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
pub mod store;

pub use backends::Backends;
pub use config::AppConfig;
pub use errors::{AppError, AppResult};
