//! Products API - REST server

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use observability::{RequestCounters, init_metrics, metrics_middleware};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::{AppState, Store};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    init_metrics();

    let state = AppState {
        store: Store::connect(&config.store).await?,
        counters: RequestCounters::new(),
    };

    let routes = api::routes(&state).merge(health_router(config.app));
    let app = create_router::<openapi::ApiDoc>(routes, &config.cors)
        .layer(axum::middleware::from_fn(metrics_middleware));

    info!(
        version = config.app.version,
        store = state.store.name(),
        "Server {} listening at http://{}",
        config.app.name,
        config.server.address()
    );
    info!("**** Resources: ****");
    for resource in api::RESOURCES {
        info!(" {}", resource);
    }

    let store = state.store.clone();
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        store.close().await;
    })
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}
