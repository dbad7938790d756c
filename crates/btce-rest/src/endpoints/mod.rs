//! API endpoint implementations

pub mod account;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;

use btce_auth::Signer;
use btce_types::RateLimitCategory;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::decode::decode;
use crate::error::RestResult;
use crate::rate_limiter::RateLimiter;
use crate::request::{RequestArgs, RequestBuilder};
use crate::transport::Transport;
use crate::types::ResultEnvelope;

/// Borrowed pieces needed to call a trade API method
///
/// Built by the client only when credentials are configured.
#[derive(Clone, Copy)]
pub(crate) struct PrivateApi<'a> {
    pub transport: &'a dyn Transport,
    pub limiter: &'a RateLimiter,
    pub requests: &'a RequestBuilder,
    pub signer: &'a Signer,
    pub api_key: &'a str,
    pub url: &'a str,
}

impl PrivateApi<'_> {
    /// Pace, encode, sign, send and decode one trade API call
    ///
    /// The nonce is drawn after the pacing wait so that it is as fresh as
    /// possible when the request leaves.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        args: RequestArgs,
    ) -> RestResult<ResultEnvelope<T>> {
        self.limiter.acquire(RateLimitCategory::Private).await;

        let request = self.requests.encode(method, args)?.sign(self.signer);
        debug!(method, nonce = request.nonce, "Making authenticated request");

        let headers = [("Key", self.api_key), ("Sign", request.signature.as_str())];
        let body = self
            .transport
            .post_form(self.url, &headers, &request.body)
            .await?;

        let envelope: ResultEnvelope<T> = decode(&body)?;
        if !envelope.is_success() {
            warn!(method, nonce = request.nonce, error = %envelope.error, "Exchange rejected request");
        }

        Ok(envelope)
    }
}

/// Borrowed pieces needed to call the public API
#[derive(Clone, Copy)]
pub(crate) struct PublicApi<'a> {
    pub transport: &'a dyn Transport,
    pub limiter: &'a RateLimiter,
    pub base_url: &'a str,
}

impl PublicApi<'_> {
    /// Pace and send a GET for `{base_url}/{pair}/{resource}`
    pub async fn get(&self, pair: &str, resource: &str) -> RestResult<String> {
        self.limiter.acquire(RateLimitCategory::Public).await;

        let url = format!("{}/{}/{}", self.base_url.trim_end_matches('/'), pair, resource);
        debug!(pair, resource, "Fetching public data");

        self.transport.get(&url).await
    }
}
