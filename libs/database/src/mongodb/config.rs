#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv};

/// MongoDB connection settings.
///
/// Built by hand in tests and tools, or from the environment with the `config` feature:
///
/// ```ignore
/// use core_config::FromEnv;
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "shop");
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,
    pub database: String,
    /// Reported to the server for its logs
    pub app_name: Option<String>,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "default".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Reads the first of `keys` that is set.
#[cfg(feature = "config")]
fn first_var(keys: &[&str]) -> Result<String, ConfigError> {
    keys.iter()
        .find_map(|key| std::env::var(key).ok())
        .ok_or_else(|| ConfigError::MissingEnvVar(keys.join(" or ")))
}

#[cfg(feature = "config")]
fn parse_var<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Environment variables:
/// - `MONGODB_URL` or `MONGO_URL` (required)
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (required)
/// - `MONGODB_APP_NAME`
/// - `MONGODB_MAX_POOL_SIZE` (default 100), `MONGODB_MIN_POOL_SIZE` (default 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            url: first_var(&["MONGODB_URL", "MONGO_URL"])?,
            database: first_var(&["MONGODB_DATABASE", "MONGO_DATABASE"])?,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: parse_var("MONGODB_MAX_POOL_SIZE", defaults.max_pool_size)?,
            min_pool_size: parse_var("MONGODB_MIN_POOL_SIZE", defaults.min_pool_size)?,
            connect_timeout_secs: parse_var(
                "MONGODB_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            server_selection_timeout_secs: parse_var(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                defaults.server_selection_timeout_secs,
            )?,
        })
    }
}

#[cfg(all(test, feature = "config"))]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 8] = [
        "MONGODB_URL",
        "MONGO_URL",
        "MONGODB_DATABASE",
        "MONGO_DATABASE",
        "MONGODB_APP_NAME",
        "MONGODB_MAX_POOL_SIZE",
        "MONGODB_MIN_POOL_SIZE",
        "MONGODB_CONNECT_TIMEOUT_SECS",
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        ALL_VARS.iter().map(|k| (*k, None)).collect()
    }

    #[test]
    fn test_from_env_requires_url() {
        temp_env::with_vars(unset_all(), || {
            let err = MongoConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("MONGODB_URL or MONGO_URL"));
        });
    }

    #[test]
    fn test_from_env_accepts_short_names_and_defaults() {
        let mut vars = unset_all();
        vars.push(("MONGO_URL", Some("mongodb://db:27017")));
        vars.push(("MONGO_DATABASE", Some("shop")));

        temp_env::with_vars(vars, || {
            let config = MongoConfig::from_env().unwrap();
            assert_eq!(config.url(), "mongodb://db:27017");
            assert_eq!(config.database(), "shop");
            assert_eq!(config.max_pool_size, 100);
            assert_eq!(config.server_selection_timeout_secs, 30);
            assert!(config.app_name.is_none());
        });
    }

    #[test]
    fn test_from_env_rejects_bad_pool_size() {
        let mut vars = unset_all();
        vars.push(("MONGODB_URL", Some("mongodb://db:27017")));
        vars.push(("MONGODB_DATABASE", Some("shop")));
        vars.push(("MONGODB_MAX_POOL_SIZE", Some("lots")));

        temp_env::with_vars(vars, || {
            let err = MongoConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("MONGODB_MAX_POOL_SIZE"));
        });
    }

    #[test]
    fn test_builders() {
        let config = MongoConfig::with_database("mongodb://x", "shop").with_app_name("products");
        assert_eq!(config.database(), "shop");
        assert_eq!(config.app_name.as_deref(), Some("products"));
        assert_eq!(MongoConfig::new("mongodb://y").database(), "default");
    }
}
