//! Types for trade API and public API requests and responses

use btce_types::{SortOrder, TradeSide, TradeType};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::decode::OrderMap;
use crate::error::{RestError, RestResult};
use crate::request::RequestArgs;

// ============================================================================
// Trade API Response Wrapper
// ============================================================================

/// Standard trade API response wrapper
///
/// `{"success":1,"return":{...}}` on success,
/// `{"success":0,"error":"..."}` on failure. A failure is a normal value
/// here; use [`into_result`](Self::into_result) to turn it into an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    /// 1 on success, 0 on failure
    pub success: u8,
    /// Error message (empty on success)
    #[serde(default)]
    pub error: String,
    /// Result data (absent on failure)
    #[serde(rename = "return")]
    pub payload: Option<T>,
}

impl<T> ResultEnvelope<T> {
    /// Check if the exchange accepted the request
    pub fn is_success(&self) -> bool {
        self.success == 1
    }

    /// Borrow the payload
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Get the payload, or the exchange error as [`RestError::Exchange`]
    pub fn into_result(self) -> RestResult<T> {
        if !self.is_success() {
            let message = if self.error.is_empty() {
                "request failed without an error message".to_string()
            } else {
                self.error
            };
            return Err(RestError::Exchange { message });
        }

        self.payload
            .ok_or_else(|| RestError::Decode("successful response without return value".to_string()))
    }
}

// ============================================================================
// Account Types
// ============================================================================

/// Balances keyed by lowercase currency code
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Funds(HashMap<String, Decimal>);

impl Funds {
    /// Balance of a currency, zero if not reported
    pub fn get(&self, currency: &str) -> Decimal {
        self.0
            .get(&currency.to_ascii_lowercase())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Currencies with a non-zero balance
    pub fn non_zero(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0
            .iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(currency, amount)| (currency.as_str(), *amount))
    }

    /// All reported balances
    pub fn as_map(&self) -> &HashMap<String, Decimal> {
        &self.0
    }
}

/// API key permissions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rights {
    /// Can read account info
    pub info: u8,
    /// Can place and cancel orders
    pub trade: u8,
    /// Can withdraw
    pub withdraw: u8,
}

impl Rights {
    /// Whether the key may trade
    pub fn can_trade(&self) -> bool {
        self.trade == 1
    }
}

/// `getInfo` result
///
/// Fields missing from the response keep their zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountInfo {
    /// Balances
    pub funds: Funds,
    /// Key permissions
    pub rights: Rights,
    /// Number of transactions on the account
    pub transaction_count: u64,
    /// Number of open orders
    pub open_orders: u64,
    /// Server time (Unix seconds)
    pub server_time: u64,
}

impl AccountInfo {
    /// Server time as a date
    pub fn server_time_utc(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.server_time)
    }
}

/// Entry of `TransHistory`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionDetail {
    /// Transaction type code
    #[serde(rename = "type")]
    pub kind: u32,
    /// Amount moved
    pub amount: Decimal,
    /// Currency of `amount`
    pub currency: String,
    /// Description
    pub desc: String,
    /// Status code
    pub status: u32,
    /// Time (Unix seconds)
    pub timestamp: u64,
}

/// Entry of `TradeHistory`
///
/// Fields missing from the response keep their zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeDetail {
    /// Currency pair
    pub pair: String,
    /// Trade type as sent by the exchange ("buy" or "sell")
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount traded
    pub amount: Decimal,
    /// Price
    pub rate: Decimal,
    /// Order that produced this trade
    pub order_id: u64,
    /// 1 if the account's own order was the maker
    pub is_your_order: u8,
    /// Time (Unix seconds)
    pub timestamp: u64,
}

impl TradeDetail {
    /// Parsed trade type, `None` for values other than buy/sell
    pub fn trade_type(&self) -> Option<TradeType> {
        self.kind.parse().ok()
    }

    /// Whether the account's order was the resting one
    pub fn is_own_order(&self) -> bool {
        self.is_your_order == 1
    }
}

/// Entry of `OrderList`
///
/// Fields missing from the response keep their zero value, so an order
/// without `status` reads as active.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDetail {
    /// Currency pair
    pub pair: String,
    /// Trade type as sent by the exchange ("buy" or "sell")
    #[serde(rename = "type")]
    pub kind: String,
    /// Remaining amount
    pub amount: Decimal,
    /// Price
    pub rate: Decimal,
    /// Status code (0 = active)
    pub status: u32,
    /// Creation time (Unix seconds)
    #[serde(alias = "timestamp_created")]
    pub timestamp: u64,
}

impl OrderDetail {
    /// Parsed trade type, `None` for values other than buy/sell
    pub fn trade_type(&self) -> Option<TradeType> {
        self.kind.parse().ok()
    }

    /// Whether the order is still on the book
    pub fn is_active(&self) -> bool {
        self.status == 0
    }
}

/// `TransHistory` payload
pub type TransactionHistory = OrderMap<TransactionDetail>;
/// `TradeHistory` payload
pub type TradeHistory = OrderMap<TradeDetail>;
/// `OrderList` payload
pub type OrderList = OrderMap<OrderDetail>;

/// `Trade` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResult {
    /// Amount filled immediately
    pub received: Decimal,
    /// Amount left on the book
    pub remains: Decimal,
    /// Id of the resting order, 0 if fully filled
    pub order_id: u64,
    /// Balances after the trade
    pub funds: Funds,
}

impl TradeResult {
    /// Whether the order was filled at once
    pub fn is_filled(&self) -> bool {
        self.remains.is_zero()
    }
}

/// `CancelOrder` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderResult {
    /// Cancelled order
    pub order_id: u64,
    /// Balances after the cancellation
    pub funds: Funds,
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Ticker for one pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    /// 24h high
    pub high: Decimal,
    /// 24h low
    pub low: Decimal,
    /// 24h average
    pub avg: Decimal,
    /// Volume in the quote currency
    pub vol: Decimal,
    /// Volume in the base currency
    pub vol_cur: Decimal,
    /// Last trade price
    pub last: Decimal,
    /// Price a buyer pays (best ask)
    pub buy: Decimal,
    /// Price a seller gets (best bid)
    pub sell: Decimal,
    /// Last update (Unix seconds)
    pub updated: u64,
    /// Server time (Unix seconds)
    #[serde(default)]
    pub server_time: u64,
}

impl Ticker {
    /// Midpoint of best bid and ask
    pub fn mid_price(&self) -> Decimal {
        (self.buy + self.sell) / Decimal::TWO
    }

    /// Difference between best ask and best bid
    pub fn spread(&self) -> Decimal {
        self.buy - self.sell
    }

    /// Last update as a date
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.updated)
    }
}

/// Public ticker response body
#[derive(Debug, Deserialize)]
pub(crate) struct TickerResponse {
    pub ticker: Ticker,
}

/// Entry of the public trade feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicTrade {
    /// Execution time (Unix seconds)
    pub date: u64,
    /// Price
    pub price: Decimal,
    /// Amount
    pub amount: Decimal,
    /// Trade id
    pub tid: u64,
    /// Quote currency (e.g., "USD")
    pub price_currency: String,
    /// Base currency (e.g., "BTC")
    pub item: String,
    /// Bid or ask
    pub trade_type: TradeSide,
}

impl PublicTrade {
    /// Execution time as a date
    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.date)
    }

    /// Value in the quote currency
    pub fn notional(&self) -> Decimal {
        self.price * self.amount
    }
}

/// Public API error body, `{"error":"..."}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum PublicResponse<T> {
    Error { error: String },
    Data(T),
}

impl<T> PublicResponse<T> {
    pub(crate) fn into_result(self) -> RestResult<T> {
        match self {
            Self::Error { error } => Err(RestError::Exchange { message: error }),
            Self::Data(data) => Ok(data),
        }
    }
}

fn unix_to_utc(secs: u64) -> Option<DateTime<Utc>> {
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

// ============================================================================
// Request Types
// ============================================================================

/// Filters shared by history and order list queries
///
/// Every filter is optional; unset (or zero) filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    /// Index of the first record to return
    pub from: Option<u64>,
    /// Number of records to return
    pub count: Option<u64>,
    /// Id of the first record to return
    pub from_id: Option<u64>,
    /// Id of the last record to return
    pub end_id: Option<u64>,
    /// Sort order (exchange default: descending)
    pub order: Option<SortOrder>,
    /// Start of the time range (Unix seconds)
    pub since: Option<u64>,
    /// End of the time range (Unix seconds)
    pub end: Option<u64>,
}

impl HistoryFilter {
    /// No filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at record index `from`
    pub fn with_from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    /// Return at most `count` records
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    /// Start at record id `from_id`
    pub fn with_from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    /// Stop at record id `end_id`
    pub fn with_end_id(mut self, end_id: u64) -> Self {
        self.end_id = Some(end_id);
        self
    }

    /// Sort order
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Only records at or after `since` (Unix seconds)
    pub fn with_since(mut self, since: u64) -> Self {
        self.since = Some(since);
        self
    }

    /// Only records at or before `end` (Unix seconds)
    pub fn with_end(mut self, end: u64) -> Self {
        self.end = Some(end);
        self
    }

    /// Time range from dates; dates before the epoch are ignored
    pub fn with_time_range(mut self, since: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.since = u64::try_from(since.timestamp()).ok();
        self.end = u64::try_from(end.timestamp()).ok();
        self
    }

    /// Add the set filters to `args`
    pub fn write_args(&self, args: &mut RequestArgs) {
        args.optional_number("from", self.from)
            .optional_number("count", self.count)
            .optional_number("from_id", self.from_id)
            .optional_number("end_id", self.end_id)
            .optional_text("order", self.order.map(|order| order.as_str()))
            .optional_number("since", self.since)
            .optional_number("end", self.end);
    }

    /// Arguments for a `TransHistory` call
    pub fn to_args(&self) -> RequestArgs {
        let mut args = RequestArgs::new();
        self.write_args(&mut args);
        args
    }
}

/// `TradeHistory` filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeHistoryQuery {
    /// Common filters
    pub filter: HistoryFilter,
    /// Only trades on this pair
    pub pair: Option<String>,
}

impl TradeHistoryQuery {
    /// No filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the common filters
    pub fn with_filter(mut self, filter: HistoryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Only trades on `pair`
    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    /// Arguments for a `TradeHistory` call
    pub fn to_args(&self) -> RequestArgs {
        let mut args = RequestArgs::new();
        self.filter.write_args(&mut args);
        args.optional_text("pair", self.pair.as_deref());
        args
    }
}

impl From<HistoryFilter> for TradeHistoryQuery {
    fn from(filter: HistoryFilter) -> Self {
        Self { filter, pair: None }
    }
}

/// `TransHistory` filters
pub type TransHistoryQuery = HistoryFilter;

/// `OrderList` filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderListQuery {
    /// Common filters
    pub filter: HistoryFilter,
    /// Only orders on this pair
    pub pair: Option<String>,
    /// Only orders still on the book
    pub active_only: bool,
}

impl OrderListQuery {
    /// No filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Active orders, optionally on one pair
    pub fn active(pair: Option<&str>) -> Self {
        Self {
            filter: HistoryFilter::default(),
            pair: pair.map(str::to_string),
            active_only: true,
        }
    }

    /// Set the common filters
    pub fn with_filter(mut self, filter: HistoryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Only orders on `pair`
    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    /// Only orders still on the book
    pub fn with_active_only(mut self, active_only: bool) -> Self {
        self.active_only = active_only;
        self
    }

    /// Arguments for an `OrderList` call
    pub fn to_args(&self) -> RequestArgs {
        let mut args = RequestArgs::new();
        self.filter.write_args(&mut args);
        args.optional_text("pair", self.pair.as_deref())
            .number("active", u64::from(self.active_only));
        args
    }
}

impl From<HistoryFilter> for OrderListQuery {
    fn from(filter: HistoryFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}

/// `Trade` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Currency pair
    pub pair: String,
    /// Buy or sell
    pub trade_type: TradeType,
    /// Price in the quote currency
    pub rate: Decimal,
    /// Amount of the base currency
    pub amount: Decimal,
}

impl OrderRequest {
    /// Limit buy
    pub fn buy(pair: impl Into<String>, rate: Decimal, amount: Decimal) -> Self {
        Self::new(pair, TradeType::Buy, rate, amount)
    }

    /// Limit sell
    pub fn sell(pair: impl Into<String>, rate: Decimal, amount: Decimal) -> Self {
        Self::new(pair, TradeType::Sell, rate, amount)
    }

    /// Limit order
    pub fn new(pair: impl Into<String>, trade_type: TradeType, rate: Decimal, amount: Decimal) -> Self {
        Self {
            pair: pair.into(),
            trade_type,
            rate,
            amount,
        }
    }

    /// Arguments for a `Trade` call
    ///
    /// All four arguments are required by the exchange and always sent.
    pub fn to_args(&self) -> RequestArgs {
        let mut args = RequestArgs::new();
        args.insert("pair", self.pair.as_str())
            .insert("type", self.trade_type.as_str())
            .insert("rate", self.rate.normalize().to_string())
            .insert("amount", self.amount.normalize().to_string());
        args
    }
}
