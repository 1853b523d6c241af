//! Bearer-token resolution.
//!
//! The core never solicits or persists credentials itself; it asks a
//! [`TokenSource`] and treats an absent or empty token as an auth
//! precondition failure. Production resolution checks the environment
//! first, then the system keychain:
//! - macOS: Keychain Services
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KDE Wallet)

use keyring::Entry;
use tracing::debug;

use crate::error::{ApiError, KeychainError};

/// Keychain service name for the stored token.
const SERVICE: &str = "mutuals";

/// Keychain account name for the stored token.
const ACCOUNT: &str = "api-token";

/// Primary environment variable consulted for a token.
const ENV_VAR: &str = "MUTUALS_TOKEN";

/// Fallback environment variable, for operators who already export one.
const ENV_VAR_FALLBACK: &str = "GITHUB_TOKEN";

// ============================================================================
// Token Source
// ============================================================================

/// Opaque secret provider returning a bearer token.
pub trait TokenSource: Send + Sync {
    /// Returns the token, or an error when none is configured.
    fn token(&self) -> Result<String, ApiError>;
}

/// Reads the token from `MUTUALS_TOKEN`, falling back to `GITHUB_TOKEN`.
#[derive(Debug, Default)]
pub struct EnvTokenSource;

impl TokenSource for EnvTokenSource {
    fn token(&self) -> Result<String, ApiError> {
        for var in [ENV_VAR, ENV_VAR_FALLBACK] {
            if let Ok(value) = std::env::var(var) {
                let value = value.trim().to_string();
                if !value.is_empty() {
                    debug!(var, "Token resolved from environment");
                    return Ok(value);
                }
            }
        }
        Err(ApiError::MissingToken(format!(
            "set {ENV_VAR} or store one with `mutuals token set`"
        )))
    }
}

/// Reads the token from the system keychain.
#[derive(Debug, Default)]
pub struct KeychainTokenSource;

impl TokenSource for KeychainTokenSource {
    fn token(&self) -> Result<String, ApiError> {
        let entry = Entry::new(SERVICE, ACCOUNT).map_err(KeychainError::from)?;
        match entry.get_password() {
            Ok(token) if !token.trim().is_empty() => {
                debug!("Token resolved from keychain");
                Ok(token.trim().to_string())
            }
            Ok(_) | Err(keyring::Error::NoEntry) => Err(ApiError::MissingToken(
                "no token in the keychain; store one with `mutuals token set`".to_string(),
            )),
            Err(e) => Err(KeychainError::from(e).into()),
        }
    }
}

/// Resolves a token from the environment, then the keychain.
pub fn resolve_token() -> Result<String, ApiError> {
    match EnvTokenSource.token() {
        Ok(token) => Ok(token),
        Err(ApiError::MissingToken(_)) => KeychainTokenSource.token(),
        Err(e) => Err(e),
    }
}

// ============================================================================
// Keychain Administration
// ============================================================================

/// Stores a token in the system keychain.
pub fn store_token(token: &str) -> Result<(), ApiError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ApiError::MissingToken("refusing to store an empty token".to_string()));
    }
    let entry = Entry::new(SERVICE, ACCOUNT).map_err(KeychainError::from)?;
    entry.set_password(token).map_err(KeychainError::from)?;
    debug!("Token stored in keychain");
    Ok(())
}

/// Deletes the stored token. Deleting a token that does not exist is fine.
pub fn delete_token() -> Result<(), ApiError> {
    let entry = Entry::new(SERVICE, ACCOUNT).map_err(KeychainError::from)?;
    match entry.delete_credential() {
        Ok(()) => {
            debug!("Token deleted from keychain");
            Ok(())
        }
        Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(KeychainError::from(e).into()),
    }
}

// ============================================================================
// Tests
// ============================================================================
