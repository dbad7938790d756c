//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use tracing::instrument;

use super::PublicApi;
use crate::decode::decode;
use crate::error::RestResult;
use crate::types::{PublicResponse, PublicTrade, Ticker, TickerResponse};

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    api: PublicApi<'a>,
}

impl<'a> MarketEndpoints<'a> {
    pub(crate) fn new(api: PublicApi<'a>) -> Self {
        Self { api }
    }

    /// Get the ticker for a pair
    ///
    /// # Arguments
    /// * `pair` - Currency pair (e.g., "btc_usd")
    #[instrument(skip(self))]
    pub async fn ticker(&self, pair: &str) -> RestResult<Ticker> {
        let body = self.api.get(pair, "ticker").await?;
        let response: PublicResponse<TickerResponse> = decode(&body)?;

        Ok(response.into_result()?.ticker)
    }

    /// Get recent public trades for a pair, newest first
    #[instrument(skip(self))]
    pub async fn trades(&self, pair: &str) -> RestResult<Vec<PublicTrade>> {
        let body = self.api.get(pair, "trades").await?;
        let response: PublicResponse<Vec<PublicTrade>> = decode(&body)?;

        response.into_result()
    }
}
