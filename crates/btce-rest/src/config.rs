//! Client configuration

use std::sync::Arc;
use std::time::Duration;

use btce_auth::{Credentials, NonceSequencer, SignatureFormat};
use btce_types::RateLimitConfig;

use crate::error::{RestError, RestResult};
use crate::rate_limiter::RateLimiter;

/// Default trade API endpoint
pub const DEFAULT_API_URL: &str = "https://btc-e.com/tapi";
/// Default public API base
pub const DEFAULT_PUBLIC_URL: &str = "https://btc-e.com/api/2";
/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default user agent
pub const DEFAULT_USER_AGENT: &str = concat!("btce-rest/", env!("CARGO_PKG_VERSION"));

const API_KEY_VAR: &str = "BTCE_API_KEY";
const API_SECRET_VAR: &str = "BTCE_API_SECRET";
const REQUEST_LIMIT_VAR: &str = "BTCE_REQUEST_LIMIT_MS";
const AUTH_REQUEST_LIMIT_VAR: &str = "BTCE_AUTH_REQUEST_LIMIT_MS";
const TIMEOUT_VAR: &str = "BTCE_TIMEOUT_SECS";

/// Client configuration
///
/// Nonce sequencer and rate limiter are created per client unless shared
/// ones are passed in. Share them when several clients use the same key,
/// since the exchange tracks nonces and limits per key.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Minimum spacing between requests
    pub rate_limits: RateLimitConfig,
    /// Trade API endpoint
    pub api_url: String,
    /// Public API base URL
    pub public_url: String,
    /// Hex format of the `Sign` header
    pub signature_format: SignatureFormat,
    /// Shared nonce sequencer
    pub nonce_sequencer: Option<Arc<NonceSequencer>>,
    /// Shared rate limiter (overrides `rate_limits`)
    pub rate_limiter: Option<Arc<RateLimiter>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            rate_limits: RateLimitConfig::btce_defaults(),
            api_url: DEFAULT_API_URL.to_string(),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            signature_format: SignatureFormat::default(),
            nonce_sequencer: None,
            rate_limiter: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from environment variables
    ///
    /// | Variable | Effect |
    /// |---|---|
    /// | `BTCE_API_KEY`, `BTCE_API_SECRET` | credentials (both or neither) |
    /// | `BTCE_REQUEST_LIMIT_MS` | public request spacing |
    /// | `BTCE_AUTH_REQUEST_LIMIT_MS` | trade API request spacing |
    /// | `BTCE_TIMEOUT_SECS` | request timeout |
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> RestResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RestResult<Self> {
        let mut config = Self::default();

        match (lookup(API_KEY_VAR), lookup(API_SECRET_VAR)) {
            (Some(key), Some(secret)) => {
                config.credentials = Some(Credentials::new(key, secret)?);
            }
            (Some(_), None) => return Err(RestError::EnvVarNotSet(API_SECRET_VAR.to_string())),
            (None, Some(_)) => return Err(RestError::EnvVarNotSet(API_KEY_VAR.to_string())),
            (None, None) => {}
        }

        if let Some(ms) = parse_var(&lookup, REQUEST_LIMIT_VAR)? {
            config.rate_limits = config.rate_limits.with_public_interval(Duration::from_millis(ms));
        }
        if let Some(ms) = parse_var(&lookup, AUTH_REQUEST_LIMIT_VAR)? {
            config.rate_limits = config.rate_limits.with_private_interval(Duration::from_millis(ms));
        }
        if let Some(secs) = parse_var(&lookup, TIMEOUT_VAR)? {
            config.timeout_secs = secs;
        }

        Ok(config)
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set request spacing
    pub fn with_rate_limits(mut self, rate_limits: RateLimitConfig) -> Self {
        self.rate_limits = rate_limits;
        self
    }

    /// Set the trade API endpoint
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the public API base URL
    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = url.into();
        self
    }

    /// Set the signature hex format
    pub fn with_signature_format(mut self, format: SignatureFormat) -> Self {
        self.signature_format = format;
        self
    }

    /// Share a nonce sequencer with other clients
    pub fn with_nonce_sequencer(mut self, nonces: Arc<NonceSequencer>) -> Self {
        self.nonce_sequencer = Some(nonces);
        self
    }

    /// Share a rate limiter with other clients
    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the settings that can be checked before any request
    pub fn validate(&self) -> RestResult<()> {
        if self.timeout_secs == 0 {
            return Err(RestError::InvalidConfig("timeout must be positive".to_string()));
        }
        for (name, url) in [("api_url", &self.api_url), ("public_url", &self.public_url)] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(RestError::InvalidConfig(format!(
                    "{} must be an http(s) URL, got {:?}",
                    name, url
                )));
            }
        }
        Ok(())
    }
}

fn parse_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> RestResult<Option<u64>> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value.trim().parse::<u64>().map(Some).map_err(|_| {
            RestError::InvalidConfig(format!("{} must be a whole number, got {:?}", name, value))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new();
        assert!(config.credentials.is_none());
        assert_eq!(config.api_url, "https://btc-e.com/tapi");
        assert_eq!(config.public_url, "https://btc-e.com/api/2");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.rate_limits, RateLimitConfig::btce_defaults());
        assert_eq!(config.signature_format, SignatureFormat::Full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(60)
            .with_user_agent("test-agent")
            .with_api_url("http://localhost:8080/tapi")
            .with_signature_format(SignatureFormat::Legacy);

        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
        assert_eq!(config.api_url, "http://localhost:8080/tapi");
        assert_eq!(config.signature_format, SignatureFormat::Legacy);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(ClientConfig::new().with_timeout(0).validate().is_err());
        assert!(matches!(
            ClientConfig::new().with_public_url("btc-e.com").validate(),
            Err(RestError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_env_empty() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.credentials.is_none());
        assert_eq!(config.rate_limits, RateLimitConfig::btce_defaults());
    }

    #[test]
    fn test_from_env_full() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("BTCE_API_KEY", "key"),
            ("BTCE_API_SECRET", "secret"),
            ("BTCE_REQUEST_LIMIT_MS", "250"),
            ("BTCE_AUTH_REQUEST_LIMIT_MS", "2000"),
            ("BTCE_TIMEOUT_SECS", " 10 "),
        ]))
        .unwrap();

        assert_eq!(config.credentials.unwrap().api_key(), "key");
        assert_eq!(config.rate_limits.public_interval, Duration::from_millis(250));
        assert_eq!(config.rate_limits.private_interval, Duration::from_millis(2000));
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_from_env_half_credentials() {
        let result = ClientConfig::from_lookup(lookup(&[("BTCE_API_KEY", "key")]));
        assert!(matches!(result, Err(RestError::EnvVarNotSet(var)) if var == "BTCE_API_SECRET"));
    }

    #[test]
    fn test_from_env_bad_number() {
        let result = ClientConfig::from_lookup(lookup(&[("BTCE_REQUEST_LIMIT_MS", "fast")]));
        assert!(matches!(result, Err(RestError::InvalidConfig(_))));
    }
}
