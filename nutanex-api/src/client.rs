//! The pre-configured HTTP client for the Nutanex backend API.
//!
//! [`ApiClient`] wraps a `reqwest::Client` bound to one deployment's API
//! root. Every request carries the JSON `Content-Type`/`Accept` pair, and
//! cookies set by the backend are replayed on later requests while
//! credential forwarding is on. Construction performs no network I/O; the
//! underlying client manages its own connection pool.

use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::environment::Environment;
use crate::error::ApiClientError;

/// MIME type sent as both `Content-Type` and `Accept` on every request.
const APPLICATION_JSON: &str = "application/json";

/// Process-wide client handed out by [`ApiClient::shared`].
static SHARED: OnceCell<ApiClient> = OnceCell::new();

/// Builder for configuring an [`ApiClient`].
///
/// ## Examples
///
/// ```rust
/// use std::time::Duration;
/// use nutanex_api::{ApiClient, Environment};
///
/// let client = ApiClient::builder(Environment::Staging)
///     .timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert_eq!(client.api_root().as_str(), "https://api.stg.nutanex.co/api/v1");
/// ```
#[derive(Debug)]
pub struct ApiClientBuilder {
    config: ApiConfig,
    extra_headers: HeaderMap,
}

impl ApiClientBuilder {
    fn new(environment: Environment) -> Self {
        Self {
            config: ApiConfig::new(environment),
            extra_headers: HeaderMap::new(),
        }
    }

    /// Overrides the resolved base endpoint.
    ///
    /// The environment label is kept and the `/api/v1` path is still
    /// appended; use this to point the client at a self-hosted or test
    /// instance of the backend.
    pub fn base_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.base_endpoint = endpoint.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Enables or disables credential forwarding (on by default).
    ///
    /// When on, cookies set by the backend (session, auth context) are
    /// stored and replayed on later requests. When off, the client holds
    /// no cookie state at all.
    pub fn forward_credentials(mut self, forward: bool) -> Self {
        self.config.forward_credentials = forward;
        self
    }

    /// Adds a default header on top of the JSON `Content-Type`/`Accept`
    /// pair. The JSON pair itself is fixed and cannot be removed.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiClientError::InvalidHeader`] if the name or value is
    /// not a legal HTTP header.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, ApiClientError> {
        let header_name =
            HeaderName::try_from(name.as_ref()).map_err(|e| ApiClientError::InvalidHeader {
                name: name.as_ref().to_string(),
                reason: e.to_string(),
            })?;
        let header_value =
            HeaderValue::try_from(value.as_ref()).map_err(|e| ApiClientError::InvalidHeader {
                name: name.as_ref().to_string(),
                reason: e.to_string(),
            })?;
        self.extra_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Builds the [`ApiClient`].
    ///
    /// ## Errors
    ///
    /// Returns [`ApiClientError::Config`] if the endpoint does not form a
    /// valid URL, or [`ApiClientError::ClientBuild`] if the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<ApiClient, ApiClientError> {
        ApiClient::with_headers(self.config, self.extra_headers)
    }
}

/// HTTP client bound to one deployment of the Nutanex backend API.
///
/// Relative paths are joined onto `<base endpoint>/api/v1`, so
/// `client.get("/users")` targets `https://api.nutanex.co/api/v1/users`
/// in production. The verb methods return `reqwest::RequestBuilder`s;
/// callers attach bodies or query parameters and `send()` themselves, and
/// transport failures surface as plain `reqwest::Error`s.
///
/// The client is a cheap handle over a shared connection pool: clone it
/// freely, or use [`ApiClient::shared`] for a process-wide instance.
///
/// ## Examples
///
/// ```rust,no_run
/// use nutanex_api::{ApiClient, Environment};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::builder(Environment::Development).build()?;
/// let response = client.get("/users")?.send().await?;
/// println!("status: {}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_root: Url,
    config: ApiConfig,
}

impl ApiClient {
    /// Creates a builder targeting the given environment.
    pub fn builder(environment: Environment) -> ApiClientBuilder {
        ApiClientBuilder::new(environment)
    }

    /// Creates a client from an already-resolved configuration.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiClientError::Config`] if the configured endpoint does
    /// not form a valid URL, or [`ApiClientError::ClientBuild`] if the
    /// HTTP client cannot be constructed.
    pub fn new(config: ApiConfig) -> Result<Self, ApiClientError> {
        Self::with_headers(config, HeaderMap::new())
    }

    /// Creates a client for the environment named by `NUTANEX_ENV` (or
    /// `APP_ENVIRONMENT`), defaulting to development when unset.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiClientError::Config`] when the configured identifier is
    /// not recognized.
    pub fn from_env() -> Result<Self, ApiClientError> {
        Self::new(ApiConfig::from_env()?)
    }

    /// Returns the process-wide client, constructing it from the
    /// environment on first use.
    ///
    /// The instance is immutable once built and safe for concurrent use.
    /// Applications that prefer explicit injection should construct their
    /// own client with [`ApiClient::new`] instead; nothing here runs at
    /// load time.
    ///
    /// ## Errors
    ///
    /// Propagates the [`ApiClient::from_env`] error until construction
    /// succeeds once.
    pub fn shared() -> Result<&'static ApiClient, ApiClientError> {
        SHARED.get_or_try_init(Self::from_env)
    }

    fn with_headers(config: ApiConfig, extra: HeaderMap) -> Result<Self, ApiClientError> {
        let api_root = config.api_root()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers.extend(extra);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(config.forward_credentials)
            .timeout(config.timeout)
            .build()
            .map_err(ApiClientError::ClientBuild)?;

        debug!(
            environment = %config.environment,
            api_root = %api_root,
            forward_credentials = config.forward_credentials,
            "constructed Nutanex API client"
        );

        Ok(Self {
            http,
            api_root,
            config,
        })
    }

    /// Resolves a path relative to the API root.
    ///
    /// Leading slashes on `path` and trailing slashes on the root collapse
    /// to a single separator, so `"users"` and `"/users"` are equivalent.
    /// An empty path yields the API root itself, and query strings pass
    /// through untouched.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiClientError::InvalidPath`] when the joined string does
    /// not parse as a URL.
    pub fn url(&self, path: &str) -> Result<Url, ApiClientError> {
        let joined = combine(self.api_root.as_str(), path);
        Url::parse(&joined).map_err(|source| ApiClientError::InvalidPath {
            path: path.to_string(),
            source,
        })
    }

    /// Starts a request for `method` against a path under the API root.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiClientError::InvalidPath`] when the path does not
    /// resolve to a valid URL.
    pub fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ApiClientError> {
        let url = self.url(path)?;
        debug!(http.method = %method, http.url = %url, "assembling API request");
        Ok(self.http.request(method, url))
    }

    /// Starts a GET request.
    pub fn get(&self, path: &str) -> Result<reqwest::RequestBuilder, ApiClientError> {
        self.request(Method::GET, path)
    }

    /// Starts a POST request.
    pub fn post(&self, path: &str) -> Result<reqwest::RequestBuilder, ApiClientError> {
        self.request(Method::POST, path)
    }

    /// Starts a PUT request.
    pub fn put(&self, path: &str) -> Result<reqwest::RequestBuilder, ApiClientError> {
        self.request(Method::PUT, path)
    }

    /// Starts a PATCH request.
    pub fn patch(&self, path: &str) -> Result<reqwest::RequestBuilder, ApiClientError> {
        self.request(Method::PATCH, path)
    }

    /// Starts a DELETE request.
    pub fn delete(&self, path: &str) -> Result<reqwest::RequestBuilder, ApiClientError> {
        self.request(Method::DELETE, path)
    }

    /// Starts a HEAD request.
    pub fn head(&self, path: &str) -> Result<reqwest::RequestBuilder, ApiClientError> {
        self.request(Method::HEAD, path)
    }

    /// Starts an OPTIONS request.
    pub fn options(&self, path: &str) -> Result<reqwest::RequestBuilder, ApiClientError> {
        self.request(Method::OPTIONS, path)
    }

    /// The versioned API root this client is bound to.
    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// The environment this client targets.
    pub fn environment(&self) -> Environment {
        self.config.environment
    }

    /// The resolved configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// The underlying `reqwest::Client`, for requests outside the API root.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

/// Joins a base URL and a relative path with exactly one separator.
fn combine(base: &str, path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return base.trim_end_matches('/').to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use std::env;

    fn production_client() -> ApiClient {
        ApiClient::new(ApiConfig::new(Environment::Production)).unwrap()
    }

    #[test]
    fn test_construction_is_offline() {
        // No server is listening on any of these endpoints; construction
        // must still succeed because it performs no I/O.
        for environment in [
            Environment::Local,
            Environment::Development,
            Environment::Staging,
            Environment::Production,
        ] {
            let client = ApiClient::new(ApiConfig::new(environment)).unwrap();
            assert_eq!(client.environment(), environment);
        }
    }

    #[test]
    fn test_api_root_includes_version_path() {
        let client = production_client();
        assert_eq!(client.api_root().as_str(), "https://api.nutanex.co/api/v1");
    }

    #[test]
    fn test_url_join_leading_slash() {
        let client = production_client();
        assert_eq!(
            client.url("/users").unwrap().as_str(),
            "https://api.nutanex.co/api/v1/users"
        );
    }

    #[test]
    fn test_url_join_bare_path() {
        let client = production_client();
        assert_eq!(
            client.url("users").unwrap().as_str(),
            "https://api.nutanex.co/api/v1/users"
        );
    }

    #[test]
    fn test_url_join_nested_path() {
        let client = production_client();
        assert_eq!(
            client.url("/users/42/orders").unwrap().as_str(),
            "https://api.nutanex.co/api/v1/users/42/orders"
        );
    }

    #[test]
    fn test_url_join_keeps_query() {
        let client = production_client();
        let url = client.url("/search?q=apples&page=2").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.nutanex.co/api/v1/search?q=apples&page=2"
        );
    }

    #[test]
    fn test_url_empty_path_is_root() {
        let client = production_client();
        assert_eq!(client.url("").unwrap(), *client.api_root());
        assert_eq!(client.url("/").unwrap(), *client.api_root());
    }

    #[test]
    fn test_builder_overrides() {
        let client = ApiClient::builder(Environment::Local)
            .base_endpoint("http://127.0.0.1:9999")
            .timeout(Duration::from_secs(5))
            .forward_credentials(false)
            .build()
            .unwrap();

        assert_eq!(client.api_root().as_str(), "http://127.0.0.1:9999/api/v1");
        assert_eq!(client.config().timeout, Duration::from_secs(5));
        assert!(!client.config().forward_credentials);
        assert_eq!(client.environment(), Environment::Local);
    }

    #[test]
    fn test_builder_rejects_invalid_header_name() {
        let result = ApiClient::builder(Environment::Local).default_header("bad header", "x");
        match result {
            Err(ApiClientError::InvalidHeader { name, .. }) => assert_eq!(name, "bad header"),
            other => panic!("expected InvalidHeader, got {other:?}"),
        }
    }

    #[test]
    fn test_builder_rejects_unparseable_endpoint() {
        let result = ApiClient::builder(Environment::Local)
            .base_endpoint("not a url")
            .build();
        match result {
            Err(ApiClientError::Config(ConfigError::InvalidEndpoint { .. })) => {}
            other => panic!("expected InvalidEndpoint, got {other:?}"),
        }
    }

    #[test]
    fn test_clone_shares_target() {
        let client = production_client();
        let clone = client.clone();
        assert_eq!(clone.api_root(), client.api_root());
        assert_eq!(clone.environment(), client.environment());
    }

    #[test]
    #[serial_test::serial]
    fn test_shared_instance_is_stable() {
        env::remove_var(crate::environment::NUTANEX_ENV);
        env::remove_var(crate::environment::APP_ENVIRONMENT_ENV);

        let first = ApiClient::shared().unwrap();
        let second = ApiClient::shared().unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.environment(), Environment::Development);
    }
}
