//! HTTP transport capability.
//!
//! The rest of the crate talks to the network only through
//! [`HttpTransport`], a one-method async trait over plain request/response
//! value types. Production uses [`ReqwestTransport`]; tests substitute
//! scripted implementations.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, instrument};

use crate::error::ApiError;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for mutuals.
const USER_AGENT_VALUE: &str = concat!("mutuals/", env!("CARGO_PKG_VERSION"));

/// GitHub API version header value.
const API_VERSION: &str = "2022-11-28";

// ============================================================================
// Request / Response Types
// ============================================================================

/// HTTP method for an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET.
    Get,
    /// PUT.
    Put,
    /// DELETE.
    Delete,
}

impl Method {
    /// Wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One outbound API request.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL.
    pub url: String,
    /// Bearer token for the authorization header.
    pub token: String,
}

/// One raw API response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
    /// Response headers as (name, value) pairs, in wire order.
    pub headers: Vec<(String, String)>,
}

impl RawResponse {
    /// Last value of the named header, compared case-insensitively.
    ///
    /// "Last" matters: when a header appears multiple times the most
    /// recent occurrence is the one the platform intends.
    pub fn header_last(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Capability for executing API requests.
///
/// Implementations must not interpret the response: status classification,
/// header parsing, and throttling all live in the client above this trait.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes one request and returns the raw response.
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// Production transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with the default timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built, which only occurs when
    /// the system's TLS configuration is fundamentally broken and network
    /// operations are impossible anyway.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom timeout.
    ///
    /// # Panics
    ///
    /// See [`ReqwestTransport::new`].
    pub fn with_timeout(timeout: Duration) -> Self {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                panic!(
                    "Failed to create HTTP client: {e}. \
                    This usually indicates a broken TLS configuration."
                )
            });
        Self { inner }
    }

    fn build_headers(request: &ApiRequest) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let auth_value = format!("Bearer {}", request.token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| ApiError::Auth(format!("Invalid token: {e}")))?,
        );
        Ok(headers)
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let headers = Self::build_headers(&request)?;

        let builder = match request.method {
            Method::Get => self.inner.get(&request.url),
            Method::Put => self.inner.put(&request.url),
            Method::Delete => self.inner.delete(&request.url),
        };

        let response = builder.headers(headers).send().await?;
        let status = response.status().as_u16();
        debug!(status, "Response received");

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            body,
            headers,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_last_is_case_insensitive() {
        let response = RawResponse {
            status: 200,
            body: String::new(),
            headers: vec![("X-RateLimit-Remaining".to_string(), "55".to_string())],
        };
        assert_eq!(response.header_last("x-ratelimit-remaining"), Some("55"));
    }

    #[test]
    fn test_header_last_takes_final_occurrence() {
        let response = RawResponse {
            status: 200,
            body: String::new(),
            headers: vec![
                ("x-ratelimit-remaining".to_string(), "55".to_string()),
                ("X-Ratelimit-Remaining".to_string(), "54".to_string()),
            ],
        };
        assert_eq!(response.header_last("x-ratelimit-remaining"), Some("54"));
    }

    #[test]
    fn test_header_last_missing() {
        let response = RawResponse {
            status: 200,
            body: String::new(),
            headers: vec![],
        };
        assert_eq!(response.header_last("x-ratelimit-reset"), None);
    }

    #[test]
    fn test_build_headers_includes_bearer_token() {
        let request = ApiRequest {
            method: Method::Get,
            url: "https://api.github.com/user".to_string(),
            token: "tok123".to_string(),
        };
        let headers = ReqwestTransport::build_headers(&request).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok123");
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/vnd.github+json");
    }

    #[test]
    fn test_build_headers_rejects_control_chars_in_token() {
        let request = ApiRequest {
            method: Method::Get,
            url: "https://api.github.com/user".to_string(),
            token: "bad\ntoken".to_string(),
        };
        assert!(ReqwestTransport::build_headers(&request).is_err());
    }
}
