//! Configuration for Products API

use axum_helpers::CorsPolicy;
use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_products::mongodb::DEFAULT_COLLECTION;
use std::str::FromStr;

pub use core_config::Environment;

/// Where products are kept, chosen by `PRODUCTS_STORE`
#[derive(Clone, Debug)]
pub enum StoreConfig {
    /// Process memory; contents are lost on restart
    Memory,
    MongoDb {
        mongodb: MongoConfig,
        collection: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StoreKind {
    Memory,
    MongoDb,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            other => Err(ConfigError::ParseError {
                key: "PRODUCTS_STORE".to_string(),
                details: format!("expected 'memory' or 'mongodb', got '{}'", other),
            }),
        }
    }
}

impl FromEnv for StoreConfig {
    fn from_env() -> Result<Self, ConfigError> {
        match env_or_default("PRODUCTS_STORE", "memory").parse::<StoreKind>()? {
            StoreKind::Memory => Ok(Self::Memory),
            StoreKind::MongoDb => Ok(Self::MongoDb {
                mongodb: MongoConfig::from_env()?.with_app_name(app_info!().name),
                collection: env_or_default("MONGODB_COLLECTION", DEFAULT_COLLECTION),
            }),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub store: StoreConfig,
    pub cors: CorsPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let cors_origins = std::env::var("CORS_ALLOWED_ORIGIN").ok();

        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env()?,
            store: StoreConfig::from_env()?,
            cors: CorsPolicy::from_origins(cors_origins.as_deref(), &environment)?,
            environment,
        })
    }
}
