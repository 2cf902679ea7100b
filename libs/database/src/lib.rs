//! Database connectors shared by the services in this workspace.
//!
//! # Features
//!
//! - `mongodb` - MongoDB client construction, health checks
//! - `config` - `core_config::FromEnv` implementations for connector configs
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryConfig, retry_with_backoff};
