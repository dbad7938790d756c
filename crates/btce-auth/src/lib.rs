//! Authentication primitives for the BTC-e trade API
//!
//! Every call to the trade API is a form-encoded POST carrying a strictly
//! increasing `nonce`, with the body signed by HMAC-SHA512 under the
//! account secret. This crate provides the three pieces involved:
//!
//! - [`Credentials`] - API key and secret (secret zeroized on drop)
//! - [`NonceSequencer`] - monotonic nonce source, shareable across clients
//! - [`Signer`] - hex-encoded HMAC-SHA512 signatures
//!
//! # Example
//!
//! ```no_run
//! use btce_auth::{Credentials, NonceSequencer};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!     let signer = creds.signer()?;
//!     let nonces = NonceSequencer::new();
//!
//!     let body = format!("method=getInfo&nonce={}", nonces.next());
//!     println!("Sign: {}", signer.sign(body.as_bytes()));
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod nonce;
mod signer;

pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
pub use nonce::NonceSequencer;
pub use signer::{SignatureFormat, Signer};
