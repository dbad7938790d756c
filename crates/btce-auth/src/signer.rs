//! HMAC-SHA512 request signing
//!
//! The trade API authenticates a request by the `Sign` header: the
//! HMAC-SHA512 of the exact POST body, keyed with the account secret and
//! rendered as lowercase hex.

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::error::{AuthError, AuthResult};

type HmacSha512 = Hmac<Sha512>;

/// Minimum width of a signature in [`SignatureFormat::Legacy`]
const LEGACY_MIN_WIDTH: usize = 40;

/// Hex rendering of the digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureFormat {
    /// Full digest width: 64 bytes as 128 hex characters
    #[default]
    Full,
    /// Digest read as an unsigned integer, printed without leading zeros
    /// and left-padded to 40 characters.
    ///
    /// Older clients of this API produced signatures this way. A digest
    /// starting with a zero nibble comes out shorter than 128 characters.
    Legacy,
}

impl SignatureFormat {
    /// Render a digest in this format
    pub fn encode(self, digest: &[u8]) -> String {
        let full = hex::encode(digest);
        match self {
            Self::Full => full,
            Self::Legacy => {
                let significant = full.trim_start_matches('0');
                format!("{:0>width$}", significant, width = LEGACY_MIN_WIDTH)
            }
        }
    }
}

/// Keyed signer for request bodies
///
/// The keyed HMAC state is computed once and cloned for every signature,
/// so signing is cheap and `&self` only.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha512,
    format: SignatureFormat,
}

impl Signer {
    /// Create a signer producing full-width signatures
    pub fn new(secret: &str) -> AuthResult<Self> {
        Self::with_format(secret, SignatureFormat::Full)
    }

    /// Create a signer with an explicit output format
    pub fn with_format(secret: &str, format: SignatureFormat) -> AuthResult<Self> {
        if secret.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "cannot sign with an empty secret".to_string(),
            ));
        }

        let mac = HmacSha512::new_from_slice(secret.as_bytes())
            .map_err(|e| AuthError::InvalidCredentials(format!("HMAC-SHA512 key rejected: {}", e)))?;

        Ok(Self { mac, format })
    }

    /// Output format of this signer
    pub fn format(&self) -> SignatureFormat {
        self.format
    }

    /// Sign a payload
    ///
    /// # Returns
    /// Lowercase hex signature of `payload`
    pub fn sign(&self, payload: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(payload);
        let digest = mac.finalize().into_bytes();
        self.format.encode(&digest)
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("algorithm", &"HMAC-SHA512")
            .field("format", &self.format)
            .finish()
    }
}
