//! Trade API request encoding
//!
//! A trade API call is a form-encoded body holding the `method` name, a
//! fresh `nonce`, and the method's own arguments. Arguments are kept in a
//! sorted map so that the encoded body, and therefore its signature, is
//! reproducible for a given nonce.

use std::collections::BTreeMap;
use std::sync::Arc;

use btce_auth::{NonceSequencer, Signer};
use rust_decimal::Decimal;

use crate::error::{RestError, RestResult};

/// Arguments of a trade API call
///
/// Optional filters follow the exchange convention that a zero number or
/// an empty string means "not set": such values are dropped here instead
/// of being sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestArgs {
    args: BTreeMap<String, String>,
}

impl RequestArgs {
    /// Empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a required argument, whatever its value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Set a numeric argument if it is strictly positive
    pub fn number(&mut self, key: &str, value: u64) -> &mut Self {
        if value > 0 {
            self.insert(key, value.to_string());
        }
        self
    }

    /// Set a decimal argument if it is strictly positive
    pub fn decimal(&mut self, key: &str, value: Decimal) -> &mut Self {
        if value > Decimal::ZERO {
            self.insert(key, value.normalize().to_string());
        }
        self
    }

    /// Set a string argument if it is non-empty
    pub fn text(&mut self, key: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.insert(key, value);
        }
        self
    }

    /// [`number`](Self::number) for an optional value
    pub fn optional_number(&mut self, key: &str, value: Option<u64>) -> &mut Self {
        self.number(key, value.unwrap_or_default())
    }

    /// [`text`](Self::text) for an optional value
    pub fn optional_text(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        self.text(key, value.unwrap_or_default())
    }

    /// Value of an argument
    pub fn get(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Whether no argument is set
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Arguments in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.args.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RequestArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (key, value) in iter {
            args.insert(key, value);
        }
        args
    }
}

/// Request body ready to be signed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    /// Trade API method name
    pub method: String,
    /// Nonce embedded in the body
    pub nonce: u64,
    /// Form-encoded body
    pub body: String,
}

impl EncodedRequest {
    /// Sign the body
    pub fn sign(self, signer: &Signer) -> SignedRequest {
        let signature = signer.sign(self.body.as_bytes());
        SignedRequest {
            method: self.method,
            nonce: self.nonce,
            body: self.body,
            signature,
        }
    }
}

/// Request body with its `Sign` header value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Trade API method name
    pub method: String,
    /// Nonce embedded in the body
    pub nonce: u64,
    /// Form-encoded body
    pub body: String,
    /// Hex HMAC-SHA512 of `body`
    pub signature: String,
}

/// Builds trade API request bodies
///
/// Each call to [`encode`](Self::encode) consumes one nonce from the
/// sequencer, even if the request is never sent.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    nonces: Arc<NonceSequencer>,
}

impl RequestBuilder {
    /// Create a builder drawing nonces from `nonces`
    pub fn new(nonces: Arc<NonceSequencer>) -> Self {
        Self { nonces }
    }

    /// The nonce sequencer in use
    pub fn nonces(&self) -> &Arc<NonceSequencer> {
        &self.nonces
    }

    /// Encode `method` with the next nonce and `args`
    ///
    /// `method` and `nonce` override any argument of the same name.
    pub fn encode(&self, method: &str, args: RequestArgs) -> RestResult<EncodedRequest> {
        let nonce = self.nonces.next();
        let body = encode_body(method, nonce, args)?;

        Ok(EncodedRequest {
            method: method.to_string(),
            nonce,
            body,
        })
    }
}

/// Form-encode a call with an explicit nonce
pub fn encode_body(method: &str, nonce: u64, mut args: RequestArgs) -> RestResult<String> {
    args.insert("method", method);
    args.insert("nonce", nonce.to_string());

    let pairs: Vec<(&str, &str)> = args.iter().collect();
    serde_urlencoded::to_string(&pairs).map_err(|e| RestError::InvalidConfig(e.to_string()))
}
