//! Immutable client configuration resolved from a deployment environment.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::environment::Environment;
use crate::error::ConfigError;

/// Versioned path segment appended to every base endpoint.
pub const API_PATH_PREFIX: &str = "/api/v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for an [`ApiClient`](crate::ApiClient).
///
/// Resolved once from an [`Environment`] and never mutated afterwards; the
/// client keeps its own copy for the lifetime of the process. Resolution is
/// a pure function of the environment, and the result is handed to the
/// client constructor explicitly rather than read from shared state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// The deployment the client targets.
    pub environment: Environment,
    /// Scheme + host of the backend, without the API path.
    pub base_endpoint: String,
    /// Capture cookies from responses and replay them on later requests.
    pub forward_credentials: bool,
    /// Total timeout applied to every request.
    pub timeout: Duration,
}

impl ApiConfig {
    /// Resolves the configuration for the given environment.
    ///
    /// Credential forwarding is on and the timeout is
    /// [`DEFAULT_TIMEOUT_SECS`]; both can be adjusted through
    /// [`ApiClient::builder`](crate::ApiClient::builder).
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            base_endpoint: environment.base_endpoint().to_string(),
            forward_credentials: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Resolves the configuration from process environment variables.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownEnvironment`] when the configured
    /// identifier is not recognized.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(Environment::from_env()?))
    }

    /// The versioned API root: the base endpoint with [`API_PATH_PREFIX`]
    /// appended.
    ///
    /// A trailing slash on the endpoint is tolerated so a custom override
    /// never doubles the separator.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] when the endpoint does not
    /// parse as a URL. The four built-in endpoints always parse; this is
    /// only reachable with a custom endpoint override.
    pub fn api_root(&self) -> Result<Url, ConfigError> {
        let root = format!(
            "{}{}",
            self.base_endpoint.trim_end_matches('/'),
            API_PATH_PREFIX
        );
        Url::parse(&root).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: root,
            source,
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(Environment::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_root_per_environment() {
        let cases = [
            (Environment::Local, "http://localhost:5000/api/v1"),
            (Environment::Development, "https://api.dev.nutanex.co/api/v1"),
            (Environment::Staging, "https://api.stg.nutanex.co/api/v1"),
            (Environment::Production, "https://api.nutanex.co/api/v1"),
        ];

        for (environment, expected) in cases {
            let root = ApiConfig::new(environment).api_root().unwrap();
            assert_eq!(root.as_str(), expected);
        }
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::new(Environment::Staging);
        assert!(config.forward_credentials);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.base_endpoint, "https://api.stg.nutanex.co");
    }

    #[test]
    fn test_default_config_targets_development() {
        let config = ApiConfig::default();
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_api_root_trims_trailing_slash() {
        let mut config = ApiConfig::new(Environment::Local);
        config.base_endpoint = "http://localhost:5000/".to_string();
        assert_eq!(
            config.api_root().unwrap().as_str(),
            "http://localhost:5000/api/v1"
        );
    }

    #[test]
    fn test_api_root_rejects_garbage_endpoint() {
        let mut config = ApiConfig::new(Environment::Local);
        config.base_endpoint = "not a url".to_string();
        let result = config.api_root();
        match result {
            Err(ConfigError::InvalidEndpoint { endpoint, .. }) => {
                assert_eq!(endpoint, "not a url/api/v1");
            }
            other => panic!("expected InvalidEndpoint, got {other:?}"),
        }
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = ApiConfig::new(Environment::Production);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ApiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
