//! HTTP client wrapping reqwest
//!
//! Deliberately thin: one GET capability with optional basic auth,
//! returning the raw status line and body. Everything above this layer
//! (paging, parsing, error shaping) is synchronous CPU work.

use crate::error::Result;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("jobhub/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Basic-auth credentials for a single request
#[derive(Debug, Clone)]
pub struct BasicAuth {
    /// Username (providers often put the API key here)
    pub username: String,
    /// Password, frequently empty
    pub password: String,
}

impl BasicAuth {
    /// Credentials from username and password
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Raw transport response: status line plus body, nothing parsed
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Canonical status message ("OK", "Not Found", ...)
    pub message: String,
    /// Response body as text
    pub body: String,
}

impl RawResponse {
    /// Whether the status code is 200
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// HTTP client shared by every adapter in a session
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Issue a GET request and return the raw response.
    ///
    /// Any non-connection outcome (including 4xx/5xx statuses) is an
    /// `Ok(RawResponse)`; only connection-level failures (DNS, refused,
    /// timeout) return `Err`.
    pub async fn fetch(&self, url: &str, auth: Option<&BasicAuth>) -> Result<RawResponse> {
        let mut request = self.client.get(url);

        for (key, value) in &self.config.default_headers {
            request = request.header(key.as_str(), value.as_str());
        }

        if let Some(credentials) = auth {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await?;
        let status = response.status();
        let message = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text().await?;

        debug!(%url, status = status.as_u16(), "GET completed");

        Ok(RawResponse {
            status: status.as_u16(),
            message,
            body,
        })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
