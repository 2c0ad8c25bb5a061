//! Middleware shared by the site and admin services.

pub mod auth;
pub mod request_id;

pub use auth::{require_admin, AuthGuard};
pub use request_id::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
