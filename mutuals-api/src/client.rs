//! Rate-limited API client.
//!
//! Wraps every outbound call with a fixed throttle delay, tracks the
//! platform's rate-limit headers, and classifies HTTP error responses
//! into [`ApiError`] values. The rate-limit state is a field on the
//! client behind an accessor, not ambient global state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use mutuals_core::{RateLimitState, Reporter};

use crate::error::ApiError;
use crate::http::{ApiRequest, HttpTransport, Method, RawResponse};

// ============================================================================
// Constants
// ============================================================================

/// Platform API base URL.
pub const API_BASE: &str = "https://api.github.com";

/// Current-identity endpoint.
const USER_ENDPOINT: &str = "/user";

/// Remaining-quota response header.
const HEADER_REMAINING: &str = "x-ratelimit-remaining";

/// Quota-reset response header.
const HEADER_RESET: &str = "x-ratelimit-reset";

/// Fixed delay before every API call.
const DEFAULT_CALL_DELAY: Duration = Duration::from_secs(2);

/// Quota threshold below which a warning is emitted.
const DEFAULT_WARN_THRESHOLD: u64 = 10;

// ============================================================================
// Settings
// ============================================================================

/// Tunables for the API client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base URL of the platform API.
    pub base_url: String,
    /// Blanket throttle applied before every call, successful or not.
    pub call_delay: Duration,
    /// Remaining-quota threshold that triggers a warning event.
    pub warn_threshold: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: API_BASE.to_string(),
            call_delay: DEFAULT_CALL_DELAY,
            warn_threshold: DEFAULT_WARN_THRESHOLD,
        }
    }
}

impl ClientSettings {
    /// Settings with no throttle delay, for tests.
    pub fn undelayed(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            call_delay: Duration::ZERO,
            warn_threshold: DEFAULT_WARN_THRESHOLD,
        }
    }
}

// ============================================================================
// API Client
// ============================================================================

/// Response from the current-identity endpoint.
#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    login: Option<String>,
}

/// Rate-limited platform API client.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    token: String,
    settings: ClientSettings,
    state: Mutex<RateLimitState>,
    reporter: Arc<dyn Reporter>,
}

impl ApiClient {
    /// Creates a client with default settings.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        token: impl Into<String>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self::with_settings(transport, token, reporter, ClientSettings::default())
    }

    /// Creates a client with custom settings.
    pub fn with_settings(
        transport: Arc<dyn HttpTransport>,
        token: impl Into<String>,
        reporter: Arc<dyn Reporter>,
        settings: ClientSettings,
    ) -> Self {
        Self {
            transport,
            token: token.into(),
            settings,
            state: Mutex::new(RateLimitState::default()),
            reporter,
        }
    }

    /// Snapshot of the current rate-limit state.
    ///
    /// # Panics
    ///
    /// Panics if the state mutex is poisoned.
    pub fn rate_limit(&self) -> RateLimitState {
        *self.state.lock().unwrap()
    }

    /// The observer this client reports progress to.
    pub fn reporter(&self) -> Arc<dyn Reporter> {
        Arc::clone(&self.reporter)
    }

    // ------------------------------------------------------------------------
    // Core call path
    // ------------------------------------------------------------------------

    /// Executes one API call against a path under the base URL.
    ///
    /// Applies the fixed throttle delay first, updates rate-limit state
    /// from the response headers unconditionally (even for error
    /// responses), and turns any status >= 400 into [`ApiError::Status`]
    /// with a message extracted from the error body.
    #[instrument(skip(self), fields(method = %method, path = %path))]
    pub async fn call(&self, method: Method, path: &str) -> Result<RawResponse, ApiError> {
        if !self.settings.call_delay.is_zero() {
            tokio::time::sleep(self.settings.call_delay).await;
        }

        let url = self.endpoint(path)?;
        debug!(%url, "API call");

        let response = self
            .transport
            .execute(ApiRequest {
                method,
                url,
                token: self.token.clone(),
            })
            .await?;

        self.absorb_rate_limit(&response);

        if response.status >= 400 {
            return Err(ApiError::Status {
                status: response.status,
                message: error_message(&response.body),
            });
        }
        Ok(response)
    }

    fn endpoint(&self, path: &str) -> Result<String, ApiError> {
        let joined = format!("{}{}", self.settings.base_url, path);
        Url::parse(&joined)
            .map(String::from)
            .map_err(|e| ApiError::InvalidUrl(format!("{joined}: {e}")))
    }

    /// Updates rate-limit state from response headers and warns when the
    /// remaining quota runs low.
    fn absorb_rate_limit(&self, response: &RawResponse) {
        let remaining = response
            .header_last(HEADER_REMAINING)
            .and_then(|v| v.parse::<u64>().ok());
        let reset = response
            .header_last(HEADER_RESET)
            .and_then(|v| v.parse::<i64>().ok());

        let state = {
            let mut state = self.state.lock().unwrap();
            state.update(remaining, reset);
            *state
        };

        if state.is_low(self.settings.warn_threshold) {
            let message = format!(
                "Rate limit low: {} calls remaining, resets {}",
                state.remaining.unwrap_or(0),
                state.reset_human()
            );
            warn!("{message}");
            self.reporter.warning(&message);
        }
    }

    // ------------------------------------------------------------------------
    // Typed operations
    // ------------------------------------------------------------------------

    /// Looks up the authenticated account's login.
    ///
    /// A rejected token or a response without a login is an
    /// [`ApiError::Auth`]: fatal to the run, surfaced for re-prompt.
    #[instrument(skip(self))]
    pub async fn viewer(&self) -> Result<String, ApiError> {
        let response = match self.call(Method::Get, USER_ENDPOINT).await {
            Ok(response) => response,
            Err(ApiError::Status { status, message }) if status == 401 || status == 403 => {
                return Err(ApiError::Auth(message));
            }
            Err(e) => return Err(e),
        };

        let user: UserResponse = serde_json::from_str(&response.body).unwrap_or(UserResponse {
            login: None,
        });
        match user.login {
            Some(login) if !login.trim().is_empty() => Ok(login),
            _ => Err(ApiError::Auth(
                "Identity lookup returned no login; token may be expired".to_string(),
            )),
        }
    }

    /// Fetches one page of a user's followers or following list and
    /// extracts the login handles.
    ///
    /// An unparseable or non-array payload yields an empty page, which the
    /// fetcher treats as the pagination termination signal.
    pub async fn relation_page(
        &self,
        user: &str,
        relation: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<String>, ApiError> {
        let path = format!("/users/{user}/{relation}?per_page={per_page}&page={page}");
        let response = self.call(Method::Get, &path).await?;
        Ok(extract_logins(&response.body))
    }

    /// Follows an account.
    pub async fn follow(&self, login: &str) -> Result<(), ApiError> {
        let path = format!("/user/following/{login}");
        self.call(Method::Put, &path).await?;
        Ok(())
    }

    /// Unfollows an account.
    pub async fn unfollow(&self, login: &str) -> Result<(), ApiError> {
        let path = format!("/user/following/{login}");
        self.call(Method::Delete, &path).await?;
        Ok(())
    }
}

// ============================================================================
// Payload Helpers
// ============================================================================

/// Extracts a human-readable message from a JSON error body, falling back
/// to a generic message when the body is not structured.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(String::from))
        .unwrap_or_else(|| "request failed".to_string())
}

/// Extracts the `login` field from each element of a JSON array payload.
///
/// Anything that is not an array of objects with a string `login` simply
/// contributes nothing; an empty result is not an error.
fn extract_logins(body: &str) -> Vec<String> {
    let Ok(serde_json::Value::Array(entries)) = serde_json::from_str(body) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| entry.get("login")?.as_str().map(String::from))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
