//! Error types for endpoint resolution and client construction.
//!
//! Transport-level failures (timeouts, connection refused, non-2xx
//! statuses) are not wrapped here: requests are handed back as
//! `reqwest::RequestBuilder`s and `send()` keeps reporting plain
//! `reqwest::Error`s.

use thiserror::Error;

/// Errors from resolving an environment identifier or endpoint URL.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown environment '{value}' (expected one of: local, development, staging, production)")]
    UnknownEnvironment { value: String },

    #[error("endpoint '{endpoint}' is not a valid URL: {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
}

/// Errors from building an API client or assembling a request URL.
#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to construct HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("invalid default header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("request path '{path}' does not form a valid URL: {source}")]
    InvalidPath {
        path: String,
        source: url::ParseError,
    },
}
