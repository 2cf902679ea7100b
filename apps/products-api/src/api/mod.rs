//! API routes module

pub mod health;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Product resources, for the startup banner
pub const RESOURCES: [&str; 2] = ["/products", "/products/{id}"];

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .merge(health::router(state.clone()))
}
