//! Trading endpoints
//!
//! These endpoints require authentication and a key with trade rights.

use btce_types::TradeType;
use rust_decimal::Decimal;
use tracing::{info, instrument};

use super::PrivateApi;
use crate::error::RestResult;
use crate::request::RequestArgs;
use crate::types::{CancelOrderResult, OrderRequest, ResultEnvelope, TradeResult};

/// Trade API method cancelling an order
pub const CANCEL_ORDER_METHOD: &str = "CancelOrder";

/// Order placement and cancellation
pub struct TradingEndpoints<'a> {
    api: PrivateApi<'a>,
}

impl<'a> TradingEndpoints<'a> {
    pub(crate) fn new(api: PrivateApi<'a>) -> Self {
        Self { api }
    }

    /// Place a limit order (`Trade`)
    ///
    /// # Arguments
    /// * `pair` - Currency pair (e.g., "btc_usd")
    /// * `trade_type` - Buy or sell
    /// * `rate` - Price in the quote currency
    /// * `amount` - Amount of the base currency
    #[instrument(skip(self))]
    pub async fn trade(
        &self,
        pair: &str,
        trade_type: TradeType,
        rate: Decimal,
        amount: Decimal,
    ) -> RestResult<ResultEnvelope<TradeResult>> {
        self.place_order(&OrderRequest::new(pair, trade_type, rate, amount))
            .await
    }

    /// Place a prepared order
    #[instrument(skip(self))]
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<ResultEnvelope<TradeResult>> {
        let envelope: ResultEnvelope<TradeResult> = self.api.call("Trade", order.to_args()).await?;

        if let Some(result) = envelope.payload() {
            info!(
                order_id = result.order_id,
                received = %result.received,
                remains = %result.remains,
                "Order placed"
            );
        }

        Ok(envelope)
    }

    /// Cancel an order (`CancelOrder`)
    ///
    /// Older clients of this API sent `CancelTrade`; the exchange expects
    /// `CancelOrder`.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<ResultEnvelope<CancelOrderResult>> {
        let mut args = RequestArgs::new();
        args.insert("order_id", order_id.to_string());

        let envelope: ResultEnvelope<CancelOrderResult> =
            self.api.call(CANCEL_ORDER_METHOD, args).await?;
        if envelope.is_success() {
            info!(order_id, "Order cancelled");
        }

        Ok(envelope)
    }
}
