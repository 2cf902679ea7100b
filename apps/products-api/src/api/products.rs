//! Products API routes

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, handlers};

use crate::state::{AppState, Store};

/// Products router over whichever store was selected
pub fn router(state: &AppState) -> Router {
    let counters = state.counters.clone();

    match &state.store {
        Store::Memory(repository) => {
            handlers::router(ProductService::with_counters(repository.clone(), counters))
        }
        Store::MongoDb { db, collection, .. } => {
            let repository = MongoProductRepository::with_collection(db, collection);
            handlers::router(ProductService::with_counters(repository, counters))
        }
    }
}
