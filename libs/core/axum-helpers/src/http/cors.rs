use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, Environment};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Which browser origins may call the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin, no credentials. Development only.
    Permissive,
    /// Explicit allow-list.
    AllowList(Vec<HeaderValue>),
    /// No CORS headers are sent, so browsers only allow same-origin calls.
    SameOrigin,
}

impl CorsPolicy {
    /// Build the policy from a comma-separated `CORS_ALLOWED_ORIGIN` value.
    ///
    /// Without a value, development is permissive and production is same-origin.
    pub fn from_origins(
        origins: Option<&str>,
        environment: &Environment,
    ) -> Result<Self, ConfigError> {
        let Some(raw) = origins else {
            return Ok(if environment.allows_any_origin() {
                Self::Permissive
            } else {
                Self::SameOrigin
            });
        };

        let parsed = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(HeaderValue::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: e.to_string(),
            })?;

        if parsed.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "no origins listed".to_string(),
            });
        }

        Ok(Self::AllowList(parsed))
    }
}

/// Turn a [`CorsPolicy`] into a tower-http layer.
///
/// Allow-listed origins get the verbs the API serves, `Content-Type` and
/// `Accept`, and a one hour preflight cache.
pub fn create_cors_layer(policy: &CorsPolicy) -> CorsLayer {
    match policy {
        CorsPolicy::Permissive => CorsLayer::permissive(),
        CorsPolicy::SameOrigin => CorsLayer::new(),
        CorsPolicy::AllowList(origins) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins.iter().cloned()))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .max_age(Duration::from_secs(3600)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_depends_on_environment() {
        assert_eq!(
            CorsPolicy::from_origins(None, &Environment::Development).unwrap(),
            CorsPolicy::Permissive
        );
        assert_eq!(
            CorsPolicy::from_origins(None, &Environment::Production).unwrap(),
            CorsPolicy::SameOrigin
        );
    }

    #[test]
    fn test_parses_comma_separated_list() {
        let policy = CorsPolicy::from_origins(
            Some("http://localhost:5173, https://shop.example.com"),
            &Environment::Production,
        )
        .unwrap();

        assert_eq!(
            policy,
            CorsPolicy::AllowList(vec![
                HeaderValue::from_static("http://localhost:5173"),
                HeaderValue::from_static("https://shop.example.com"),
            ])
        );
    }

    #[test]
    fn test_rejects_empty_list() {
        let err = CorsPolicy::from_origins(Some(" , "), &Environment::Development).unwrap_err();
        assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
    }

    #[test]
    fn test_rejects_invalid_header_value() {
        assert!(CorsPolicy::from_origins(Some("http://bad\norigin"), &Environment::Development).is_err());
    }
}
