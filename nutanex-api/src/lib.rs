//! Pre-configured HTTP client for the Nutanex backend API.
//!
//! The backend is deployed to a small fixed set of environments (local,
//! development, staging, production), each with its own base endpoint.
//! This crate resolves an [`Environment`] to that endpoint, appends the
//! versioned `/api/v1` path, and hands out an [`ApiClient`]: a
//! `reqwest::Client` that sends `Content-Type: application/json` and
//! `Accept: application/json` on every request and forwards credentials
//! (cookies) to the backend.
//!
//! Endpoint resolution is a pure function of the environment, computed once
//! into an immutable [`ApiConfig`] and injected into the client
//! constructor; nothing happens at load time.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use nutanex_api::{ApiClient, Environment};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Pick the environment explicitly...
//! let client = ApiClient::builder(Environment::Staging).build()?;
//! let users = client.get("/users")?.send().await?;
//!
//! // ...or use the process-wide instance resolved from NUTANEX_ENV.
//! let shared = ApiClient::shared()?;
//! let me = shared.get("/users/me")?.send().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod environment;
pub mod error;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::{ApiConfig, API_PATH_PREFIX, DEFAULT_TIMEOUT_SECS};
pub use environment::{Environment, DEFAULT_ENVIRONMENT};
pub use error::{ApiClientError, ConfigError};
