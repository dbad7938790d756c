//! API credentials for the trade API
//!
//! # Security
//!
//! The secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretString};

use crate::error::{AuthError, AuthResult};
use crate::signer::{SignatureFormat, Signer};

/// Environment variable holding the API key
pub(crate) const API_KEY_VAR: &str = "BTCE_API_KEY";
/// Environment variable holding the API secret
pub(crate) const API_SECRET_VAR: &str = "BTCE_API_SECRET";

/// API credentials for authenticated requests
///
/// The key is sent in clear in the `Key` header; the secret never leaves
/// the process and is only used as the HMAC key.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// API secret (zeroized on drop)
    secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// Both values are required; an empty key or secret is rejected here so
    /// that a misconfigured client fails before the first request.
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let secret = secret.into();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if secret.is_empty() {
            return Err(AuthError::InvalidCredentials("API secret is empty".to_string()));
        }

        Ok(Self {
            api_key,
            secret: SecretString::from(secret),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BTCE_API_KEY` and `BTCE_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_VAR.to_string()))?;
        let secret = std::env::var(API_SECRET_VAR)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_VAR.to_string()))?;

        Self::new(api_key, secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Build a signer keyed with this secret
    pub fn signer(&self) -> AuthResult<Signer> {
        self.signer_with_format(SignatureFormat::Full)
    }

    /// Build a signer keyed with this secret using the given output format
    pub fn signer_with_format(&self, format: SignatureFormat) -> AuthResult<Signer> {
        Signer::with_format(self.secret.expose_secret(), format)
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret: SecretString::from(self.secret.expose_secret().to_string()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = self
            .api_key
            .char_indices()
            .nth(8)
            .map(|(idx, _)| &self.api_key[..idx])
            .unwrap_or(&self.api_key);

        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
