//! API error types.

use thiserror::Error;

// ============================================================================
// API Error
// ============================================================================

/// Error type for API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The token was rejected or the identity lookup returned no login.
    /// Fatal to the run; the caller should re-prompt for credentials.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The platform answered with an error status (HTTP >= 400).
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, or a generic fallback.
        message: String,
    },

    /// Underlying HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Keychain error.
    #[error("Keychain error: {0}")]
    Keychain(#[from] KeychainError),

    /// No bearer token is configured.
    #[error("No token configured: {0}")]
    MissingToken(String),
}

impl ApiError {
    /// True for errors that should end the run and send the operator back
    /// to credential setup.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_) | Self::MissingToken(_))
    }
}

// ============================================================================
// Keychain Error
// ============================================================================

/// Error type for keychain operations.
#[derive(Debug, Error)]
pub enum KeychainError {
    /// Credential not found.
    #[error("Credential not found for {service}/{account}")]
    NotFound {
        /// Service name.
        service: String,
        /// Account name.
        account: String,
    },

    /// Access denied.
    #[error("Access denied to keychain")]
    AccessDenied,

    /// Platform error.
    #[error("Platform error: {0}")]
    Platform(String),

    /// Generic error.
    #[error("Keychain error: {0}")]
    Other(String),
}

impl From<keyring::Error> for KeychainError {
    fn from(err: keyring::Error) -> Self {
        match err {
            keyring::Error::NoEntry => KeychainError::NotFound {
                service: String::new(),
                account: String::new(),
            },
            keyring::Error::Ambiguous(_) => {
                KeychainError::Other("Ambiguous credential entry".to_string())
            }
            keyring::Error::PlatformFailure(e) => KeychainError::Platform(e.to_string()),
            keyring::Error::NoStorageAccess(_) => KeychainError::AccessDenied,
            _ => KeychainError::Other(err.to_string()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_formatting() {
        let err = ApiError::Status {
            status: 403,
            message: "rate limit exceeded".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP 403: rate limit exceeded");
    }

    #[test]
    fn test_auth_classification() {
        assert!(ApiError::Auth("bad token".to_string()).is_auth());
        assert!(ApiError::MissingToken("set one".to_string()).is_auth());
        assert!(
            !ApiError::Status {
                status: 500,
                message: "oops".to_string()
            }
            .is_auth()
        );
    }
}
