//! Readiness and metrics endpoints

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use database::mongodb::check_health;
use observability::metrics_handler;
use serde_json::Value;

use crate::state::{AppState, Store};

type ReadyResult = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;

/// Ready once the selected store answers; the memory store always does.
async fn ready(State(state): State<AppState>) -> ReadyResult {
    let mut checks: Vec<(&str, HealthCheckFuture)> = Vec::new();

    if let Store::MongoDb { db, .. } = &state.store {
        let check: HealthCheckFuture = Box::pin(check_health(db));
        checks.push(("mongodb", check));
    }

    run_health_checks(checks).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}
