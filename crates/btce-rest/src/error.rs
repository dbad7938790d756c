//! Error types for REST API operations

use btce_auth::AuthError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed (connection, DNS, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered outside the 2xx range
    #[error("HTTP status {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Start of the response body
        body: String,
    },

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Transport failed for another reason
    #[error("Transport error: {0}")]
    Transport(String),

    /// Missing API credentials for a trade API method
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Credential or signer setup failed
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Failed to decode the response body
    #[error("Decode error: {0}")]
    Decode(String),

    /// Well-formed response reporting failure
    #[error("Exchange error: {message}")]
    Exchange {
        /// Error string returned by the exchange
        message: String,
    },
}

/// Broad grouping of [`RestError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing or invalid credentials and settings
    Configuration,
    /// The request did not produce a usable response
    Network,
    /// The response could not be decoded
    Decode,
    /// The exchange rejected the request
    Exchange,
}

impl RestError {
    /// Which class this error belongs to
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::AuthRequired | Self::Auth(_) | Self::InvalidConfig(_) | Self::EnvVarNotSet(_) => {
                ErrorClass::Configuration
            }
            Self::Http(_) | Self::Status { .. } | Self::Timeout | Self::Transport(_) => {
                ErrorClass::Network
            }
            Self::Decode(_) => ErrorClass::Decode,
            Self::Exchange { .. } => ErrorClass::Exchange,
        }
    }

    /// Check if this error means the client is misconfigured
    pub fn is_configuration(&self) -> bool {
        self.class() == ErrorClass::Configuration
    }

    /// Check if this error happened on the wire
    pub fn is_network(&self) -> bool {
        self.class() == ErrorClass::Network
    }

    /// Check if the exchange reported an invalid nonce
    ///
    /// The exchange answers with e.g. `invalid nonce parameter; on key:4,
    /// you sent:'3'` when a nonce is not above the last one it accepted.
    pub fn is_invalid_nonce(&self) -> bool {
        matches!(self, Self::Exchange { message } if message.contains("invalid nonce"))
    }

    /// Create an exchange error from the message it returned
    pub fn exchange(message: impl Into<String>) -> Self {
        Self::Exchange {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for RestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
