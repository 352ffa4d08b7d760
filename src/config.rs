//! client configuration
//!
//! build a [`ClientConfig`] with the graphql endpoint and optional overrides.
//! pass it to [`crate::Client::new`] to create a client.

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

type BuilderHook = Arc<dyn Fn(reqwest::ClientBuilder) -> reqwest::ClientBuilder + Send + Sync>;

/// configuration for the graphql client
#[derive(Clone)]
pub struct ClientConfig {
    /// original endpoint input
    pub(crate) raw_endpoint: String,

    /// graphql endpoint (e.g., "<https://api.example.com/graphql>")
    pub(crate) endpoint: Url,

    /// whether the provided endpoint parsed successfully
    pub(crate) endpoint_valid: bool,

    /// bearer token sent in the authorization header
    pub(crate) token: Option<String>,

    /// request timeout duration
    pub(crate) timeout: Duration,

    /// user agent string
    pub(crate) user_agent: String,

    /// whether to verify ssl certificates
    pub(crate) verify_ssl: bool,

    /// additional headers to send with every request
    pub(crate) extra_headers: HeaderMap,

    /// prebuilt http client (takes precedence over http_client_builder)
    pub(crate) http_client: Option<reqwest::Client>,

    /// callback to customize the http client builder before building
    pub(crate) http_client_builder: Option<BuilderHook>,
}

impl ClientConfig {
    /// create a new client configuration
    ///
    /// # arguments
    ///
    /// * `endpoint` - the graphql endpoint url; `https://` is assumed when
    ///   no scheme is given
    ///
    /// # example
    ///
    /// ```
    /// use gql_shape::ClientConfig;
    ///
    /// let config = ClientConfig::new("https://api.example.com/graphql");
    /// ```
    pub fn new(endpoint: impl AsRef<str>) -> Self {
        let raw = endpoint.as_ref();
        let normalized = raw.trim().trim_end_matches('/');

        let parsed = Url::parse(normalized)
            .ok()
            .filter(|url| url.has_host())
            .or_else(|| Url::parse(&format!("https://{normalized}")).ok());
        let (endpoint, endpoint_valid) = match parsed {
            Some(url) => (url, true),
            None => (
                Url::parse("https://invalid.invalid").expect("static url parses"),
                false,
            ),
        };

        Self {
            raw_endpoint: raw.to_string(),
            endpoint,
            endpoint_valid,
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("gql-shape/{} (Rust)", env!("CARGO_PKG_VERSION")),
            verify_ssl: true,
            extra_headers: HeaderMap::new(),
            http_client: None,
            http_client_builder: None,
        }
    }

    /// send `Authorization: Bearer <token>` with every request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// set the request timeout
    ///
    /// default: 30 seconds
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// set a custom user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// disable ssl certificate verification (not recommended for production)
    ///
    /// default: enabled
    pub fn with_ssl_verification(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// add a header to every request
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra_headers.insert(name, value);
        self
    }

    /// add a set of headers to every request
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.extra_headers.extend(headers);
        self
    }

    /// access extra headers configured on this client
    pub fn extra_headers(&self) -> &HeaderMap {
        &self.extra_headers
    }

    /// the endpoint requests are posted to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// inject a prebuilt http client.
    ///
    /// when set, this client is used as-is and takes precedence over
    /// `with_http_client_builder`. auth headers, tls, timeouts and the user
    /// agent all come from the prebuilt client; the corresponding
    /// `ClientConfig` fields are ignored.
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// customize the http client builder before the client is created.
    ///
    /// the callback receives a builder that already has the auth header,
    /// extra headers, user agent, timeout, and ssl settings applied.
    ///
    /// ignored if `with_http_client` is also set.
    pub fn with_http_client_builder<F>(mut self, f: F) -> Self
    where
        F: Fn(reqwest::ClientBuilder) -> reqwest::ClientBuilder + Send + Sync + 'static,
    {
        self.http_client_builder = Some(Arc::new(f));
        self
    }

    /// validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.endpoint_valid {
            return Err(Error::Config(format!(
                "invalid endpoint: {}",
                self.raw_endpoint
            )));
        }

        if self.endpoint.scheme() != "http" && self.endpoint.scheme() != "https" {
            return Err(Error::Config(format!(
                "invalid url scheme: {}. must be http or https",
                self.endpoint.scheme()
            )));
        }

        if self.http_client.is_none() && self.token.as_deref() == Some("") {
            return Err(Error::Config("bearer token cannot be empty".to_string()));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("verify_ssl", &self.verify_ssl)
            .field("extra_headers", &self.extra_headers.len())
            .field("http_client", &self.http_client.is_some())
            .field("http_client_builder", &self.http_client_builder.is_some())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = ClientConfig::new("https://api.example.com/graphql/");
        assert_eq!(config.endpoint.as_str(), "https://api.example.com/graphql");
        assert!(config.token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scheme_defaults_to_https() {
        let config = ClientConfig::new("api.example.com/graphql");
        assert_eq!(config.endpoint().as_str(), "https://api.example.com/graphql");
    }

    #[test]
    fn test_validation_empty_token() {
        let empty = ClientConfig::new("https://api.example.com").with_bearer_token("");
        assert!(matches!(empty.validate(), Err(Error::Config(_))));

        // a prebuilt client manages its own auth
        let prebuilt = ClientConfig::new("https://api.example.com")
            .with_bearer_token("")
            .with_http_client(reqwest::Client::new());
        assert!(prebuilt.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut config = ClientConfig::new("https://api.example.com");
        config.endpoint_valid = false;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validation_invalid_scheme() {
        let config = ClientConfig::new("ftp://example.com/graphql");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builder_helpers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-test"),
            HeaderValue::from_static("value"),
        );

        let config = ClientConfig::new("https://api.example.com/graphql")
            .with_bearer_token("secret")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("gql-shape-test")
            .with_ssl_verification(false)
            .with_headers(headers.clone())
            .with_header(
                HeaderName::from_static("x-other"),
                HeaderValue::from_static("other"),
            );

        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "gql-shape-test");
        assert!(!config.verify_ssl);
        assert_eq!(config.extra_headers.get("x-test").unwrap(), "value");
        assert_eq!(config.extra_headers.get("x-other").unwrap(), "other");
        assert_eq!(config.extra_headers(), &config.extra_headers);
    }

    #[test]
    fn test_with_http_client_builder() {
        let config = ClientConfig::new("https://api.example.com")
            .with_http_client_builder(|b| b.connection_verbose(true));
        assert!(config.http_client.is_none());
        assert!(config.http_client_builder.is_some());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("https://api.example.com").with_bearer_token("secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("\"<redacted>\""));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("http_client: false"));
    }
}
