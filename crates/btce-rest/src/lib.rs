//! REST API client for the BTC-e exchange
//!
//! This crate provides an async client for the public market data API and
//! the authenticated trade API.
//!
//! # Features
//!
//! - **Market Data**: Ticker, recent public trades
//! - **Account**: Balances, transaction history, trade history, order list
//! - **Trading**: Place and cancel limit orders
//!
//! # Authentication
//!
//! Trade API calls are form-encoded POSTs carrying a strictly increasing
//! nonce. The body is signed with HMAC-SHA512 under the account secret and
//! sent with the `Key` and `Sign` headers.
//!
//! # Example
//!
//! ```no_run
//! use btce_rest::{BtceClient, ClientConfig, HistoryFilter, Pair, TradeHistoryQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BtceClient::with_config(ClientConfig::from_env()?)?;
//!
//!     let ticker = client.ticker(Pair::BTC_USD).await?;
//!     println!("BTC/USD: {}", ticker.last);
//!
//!     let query = TradeHistoryQuery::new()
//!         .with_pair(Pair::BTC_USD)
//!         .with_filter(HistoryFilter::new().with_count(10));
//!     for trade in client.trade_history(&query).await?.into_result()? {
//!         println!("{} {} @ {}", trade.order_id, trade.details.amount, trade.details.rate);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rate Limiting
//!
//! Requests are spaced by a minimum interval, one second by default, kept
//! separately for public and trade API calls. See [`RateLimitConfig`].

pub mod client;
pub mod config;
pub mod decode;
pub mod endpoints;
pub mod error;
pub mod rate_limiter;
pub mod request;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::BtceClient;
pub use config::ClientConfig;
pub use error::{ErrorClass, RestError, RestResult};
pub use rate_limiter::RateLimiter;
pub use transport::{HttpTransport, Transport};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::{MockTransport, RecordedRequest};

// Re-export endpoint-specific types
pub use decode::{OrderEntry, OrderMap};
pub use types::{
    AccountInfo, CancelOrderResult, Funds, HistoryFilter, OrderDetail, OrderList, OrderListQuery,
    OrderRequest, PublicTrade, ResultEnvelope, Rights, Ticker, TradeDetail, TradeHistory,
    TradeHistoryQuery, TradeResult, TransHistoryQuery, TransactionDetail, TransactionHistory,
};

// Re-export auth and shared types
pub use btce_auth::{Credentials, NonceSequencer, SignatureFormat};
pub use btce_types::{
    Decimal, Pair, RateLimitCategory, RateLimitConfig, SortOrder, TradeSide, TradeType,
};
