//! Application state management

use database::mongodb::{Client, Database, connect_from_config_with_retry};
use domain_products::InMemoryProductRepository;
use observability::RequestCounters;
use tracing::info;

use crate::config::StoreConfig;

/// The product store selected at startup
#[derive(Clone)]
pub enum Store {
    Memory(InMemoryProductRepository),
    MongoDb {
        client: Client,
        db: Database,
        collection: String,
    },
}

impl Store {
    pub async fn connect(config: &StoreConfig) -> eyre::Result<Self> {
        match config {
            StoreConfig::Memory => {
                info!("Using in-memory product store");
                Ok(Store::Memory(InMemoryProductRepository::new()))
            }
            StoreConfig::MongoDb {
                mongodb,
                collection,
            } => {
                let client = connect_from_config_with_retry(mongodb, None).await?;
                let db = client.database(mongodb.database());

                info!(
                    database = mongodb.database(),
                    collection = %collection,
                    "Using MongoDB product store"
                );
                Ok(Store::MongoDb {
                    client,
                    db,
                    collection: collection.clone(),
                })
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Store::Memory(_) => "memory",
            Store::MongoDb { .. } => "mongodb",
        }
    }

    /// Release store resources during shutdown
    pub async fn close(self) {
        if let Store::MongoDb { client, .. } = self {
            info!("Shutting down: closing MongoDB connections");
            client.shutdown().await;
            info!("MongoDB connection closed");
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub counters: RequestCounters,
}
