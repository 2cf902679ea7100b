//! HTTP middleware: CORS policy and security headers.
//!
//! ```ignore
//! use axum_helpers::http::{CorsPolicy, create_cors_layer, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(create_cors_layer(&CorsPolicy::Permissive));
//! ```

pub mod cors;
pub mod security;

pub use cors::{CorsPolicy, create_cors_layer};
pub use security::security_headers;
