//! Sync error types.
//!
//! Auth and fetch failures abort the enclosing operation; per-item action
//! failures never appear here because the executor aggregates them into
//! the run summary instead of raising.

use thiserror::Error;

use mutuals_api::ApiError;

/// Error type for orchestrated sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Identity lookup failed or no token is configured. Fatal to the
    /// run; the operator needs to fix credentials.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A paginated fetch failed mid-way. The phase aborts rather than
    /// reconciling against a partial set.
    #[error("Failed to fetch {relation}: {source}")]
    Fetch {
        /// Which relation set was being fetched.
        relation: String,
        /// The underlying API error.
        source: ApiError,
    },

    /// Any other API failure.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SyncError {
    /// True when the fix is credential setup rather than a retry.
    pub fn is_auth(&self) -> bool {
        match self {
            Self::Auth(_) => true,
            Self::Api(e) => e.is_auth(),
            Self::Fetch { .. } => false,
        }
    }

    /// Wraps an identity-lookup failure, folding auth-ish API errors into
    /// the dedicated variant.
    pub(crate) fn from_identity(err: ApiError) -> Self {
        if err.is_auth() {
            Self::Auth(err.to_string())
        } else {
            Self::Api(err)
        }
    }

    /// Wraps a fetch failure with the relation being fetched.
    pub(crate) fn from_fetch(relation: impl Into<String>, err: ApiError) -> Self {
        Self::Fetch {
            relation: relation.into(),
            source: err,
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
    fn test_auth_detection() {
        let err = SyncError::from_identity(ApiError::Auth("bad token".to_string()));
        assert!(err.is_auth());

        let err = SyncError::from_fetch(
            "followers",
            ApiError::Status {
                status: 500,
                message: "oops".to_string(),
            },
        );
        assert!(!err.is_auth());
    }

    #[test]
    fn test_fetch_error_formatting() {
        let err = SyncError::from_fetch(
            "following",
            ApiError::Status {
                status: 502,
                message: "bad gateway".to_string(),
            },
        );
        assert_eq!(
            format!("{err}"),
            "Failed to fetch following: HTTP 502: bad gateway"
        );
    }
}
