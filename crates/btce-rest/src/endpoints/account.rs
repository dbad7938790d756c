//! Account endpoints
//!
//! These endpoints require authentication.

use tracing::instrument;

use super::PrivateApi;
use crate::error::RestResult;
use crate::request::RequestArgs;
use crate::types::{
    AccountInfo, OrderList, OrderListQuery, ResultEnvelope, TradeHistory, TradeHistoryQuery,
    TransHistoryQuery, TransactionHistory,
};

/// Account information and history
pub struct AccountEndpoints<'a> {
    api: PrivateApi<'a>,
}

impl<'a> AccountEndpoints<'a> {
    pub(crate) fn new(api: PrivateApi<'a>) -> Self {
        Self { api }
    }

    /// Get balances, key rights and counters (`getInfo`)
    #[instrument(skip(self))]
    pub async fn get_info(&self) -> RestResult<ResultEnvelope<AccountInfo>> {
        self.api.call("getInfo", RequestArgs::new()).await
    }

    /// Get deposits, withdrawals and other balance movements (`TransHistory`)
    #[instrument(skip(self))]
    pub async fn transaction_history(
        &self,
        query: &TransHistoryQuery,
    ) -> RestResult<ResultEnvelope<TransactionHistory>> {
        self.api.call("TransHistory", query.to_args()).await
    }

    /// Get executed trades (`TradeHistory`)
    #[instrument(skip(self))]
    pub async fn trade_history(
        &self,
        query: &TradeHistoryQuery,
    ) -> RestResult<ResultEnvelope<TradeHistory>> {
        self.api.call("TradeHistory", query.to_args()).await
    }

    /// Get orders (`OrderList`)
    #[instrument(skip(self))]
    pub async fn order_list(&self, query: &OrderListQuery) -> RestResult<ResultEnvelope<OrderList>> {
        self.api.call("OrderList", query.to_args()).await
    }

    /// Get orders still on the book, optionally for one pair
    #[instrument(skip(self))]
    pub async fn active_orders(&self, pair: Option<&str>) -> RestResult<ResultEnvelope<OrderList>> {
        self.order_list(&OrderListQuery::active(pair)).await
    }
}
