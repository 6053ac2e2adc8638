//! Deployment environments for the Nutanex backend.
//!
//! Each environment maps to a fixed base endpoint (scheme + host). The set
//! is closed: there are exactly four deployments, and the lookup is a plain
//! `match` rather than anything configurable.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::warn;

use crate::error::ConfigError;

/// Primary environment variable consulted by [`Environment::from_env`].
pub const NUTANEX_ENV: &str = "NUTANEX_ENV";

/// Alternative environment variable, honored when [`NUTANEX_ENV`] is unset.
pub const APP_ENVIRONMENT_ENV: &str = "APP_ENVIRONMENT";

/// The environment targeted when nothing is configured.
///
/// When developing against a backend on this machine, export
/// `NUTANEX_ENV=local` instead of editing code.
pub const DEFAULT_ENVIRONMENT: Environment = Environment::Development;

/// A deployed instance of the Nutanex backend.
///
/// Identifiers are lowercase on the wire and in configuration:
/// `local`, `development`, `staging`, `production`.
///
/// ## Examples
///
/// ```rust
/// use nutanex_api::Environment;
///
/// let env: Environment = "staging".parse().unwrap();
/// assert_eq!(env, Environment::Staging);
/// assert_eq!(env.to_string(), "staging");
/// assert_eq!(env.base_endpoint(), "https://api.stg.nutanex.co");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// A backend running on this machine.
    Local,
    /// The shared development deployment.
    #[default]
    Development,
    /// The pre-production staging deployment.
    Staging,
    /// The live deployment.
    Production,
}

impl Environment {
    /// Returns the base endpoint (scheme + host) for this environment.
    ///
    /// The versioned API path is not included here; see
    /// [`ApiConfig::api_root`](crate::ApiConfig::api_root).
    pub fn base_endpoint(&self) -> &'static str {
        match self {
            Self::Local => "http://localhost:5000",
            Self::Development => "https://api.dev.nutanex.co",
            Self::Staging => "https://api.stg.nutanex.co",
            Self::Production => "https://api.nutanex.co",
        }
    }

    /// Resolves an identifier, falling back to [`Environment::Production`]
    /// for anything unrecognized.
    ///
    /// The fallback is logged at `warn` rather than silent. Prefer
    /// [`str::parse`] when an unknown identifier should be an error.
    pub fn parse_or_production(value: &str) -> Self {
        match value.parse() {
            Ok(env) => env,
            Err(_) => {
                warn!(
                    value,
                    "unknown environment identifier, falling back to production"
                );
                Self::Production
            }
        }
    }

    /// Reads the environment from `NUTANEX_ENV`, then `APP_ENVIRONMENT`.
    ///
    /// Unset or blank variables yield [`DEFAULT_ENVIRONMENT`]; a set but
    /// unrecognized value is an error rather than a silent fallback.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::UnknownEnvironment`] if the configured value
    /// is not one of the four known identifiers.
    pub fn from_env() -> Result<Self, ConfigError> {
        let value = [NUTANEX_ENV, APP_ENVIRONMENT_ENV]
            .iter()
            .find_map(|name| env::var(name).ok().filter(|v| !v.trim().is_empty()));

        match value {
            Some(value) => value.trim().parse(),
            None => Ok(DEFAULT_ENVIRONMENT),
        }
    }

    /// Returns `true` for the locally hosted backend.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }

    /// Returns `true` for the live deployment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::UnknownEnvironment {
                value: other.to_string(),
            }),
        }
    }
}
