//! Main REST client implementation

use std::sync::Arc;

use btce_auth::{Credentials, NonceSequencer, Signer};
use btce_types::TradeType;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::{ClientConfig, DEFAULT_USER_AGENT};
use crate::endpoints::{
    AccountEndpoints, MarketEndpoints, PrivateApi, PublicApi, TradingEndpoints,
};
use crate::error::{RestError, RestResult};
use crate::rate_limiter::RateLimiter;
use crate::request::RequestBuilder;
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    AccountInfo, CancelOrderResult, OrderList, OrderListQuery, PublicTrade, ResultEnvelope,
    Ticker, TradeHistory, TradeHistoryQuery, TradeResult, TransHistoryQuery, TransactionHistory,
};

/// BTC-e REST API client
///
/// Provides access to both the public API and the trade API. Cloning is
/// cheap and clones share the nonce sequencer and rate limiter.
///
/// # Example
///
/// ```no_run
/// use btce_rest::{BtceClient, ClientConfig, Credentials, Pair};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BtceClient::new()?;
///     let ticker = client.ticker(Pair::BTC_USD).await?;
///     println!("last: {}", ticker.last);
///
///     // With authentication for the trade API
///     let creds = Credentials::from_env()?;
///     let auth_client = BtceClient::with_credentials(creds)?;
///     let info = auth_client.get_info().await?.into_result()?;
///     println!("usd: {}", info.funds.get("usd"));
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BtceClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    limiter: Arc<RateLimiter>,
    requests: RequestBuilder,
    auth: Option<AuthContext>,
    api_url: String,
    public_url: String,
}

struct AuthContext {
    api_key: String,
    signer: Signer,
}

impl BtceClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        config.validate()?;
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let transport = HttpTransport::new(config.timeout(), user_agent)?;

        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client sending requests through `transport`
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> RestResult<Self> {
        config.validate()?;

        let auth = config
            .credentials
            .as_ref()
            .map(|creds| -> RestResult<AuthContext> {
                Ok(AuthContext {
                    api_key: creds.api_key().to_string(),
                    signer: creds.signer_with_format(config.signature_format)?,
                })
            })
            .transpose()?;

        let limiter = config
            .rate_limiter
            .clone()
            .unwrap_or_else(|| Arc::new(RateLimiter::new(config.rate_limits)));
        let nonces = config
            .nonce_sequencer
            .clone()
            .unwrap_or_else(|| Arc::new(NonceSequencer::new()));

        info!(
            authenticated = auth.is_some(),
            api_url = %config.api_url,
            "Created BTC-e REST client"
        );

        Ok(Self {
            inner: Arc::new(ClientInner {
                transport,
                limiter,
                requests: RequestBuilder::new(nonces),
                auth,
                api_url: config.api_url,
                public_url: config.public_url,
            }),
        })
    }

    /// Check if the client has credentials for the trade API
    pub fn has_credentials(&self) -> bool {
        self.inner.auth.is_some()
    }

    /// Rate limiter in use
    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.inner.limiter
    }

    /// Nonce sequencer in use
    pub fn nonce_sequencer(&self) -> &Arc<NonceSequencer> {
        self.inner.requests.nonces()
    }

    fn private_api(&self) -> RestResult<PrivateApi<'_>> {
        let auth = self.inner.auth.as_ref().ok_or(RestError::AuthRequired)?;
        Ok(PrivateApi {
            transport: self.inner.transport.as_ref(),
            limiter: &self.inner.limiter,
            requests: &self.inner.requests,
            signer: &auth.signer,
            api_key: &auth.api_key,
            url: &self.inner.api_url,
        })
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(PublicApi {
            transport: self.inner.transport.as_ref(),
            limiter: &self.inner.limiter,
            base_url: &self.inner.public_url,
        })
    }

    /// Get the ticker for a pair
    ///
    /// Accepts a [`Pair`](btce_types::Pair) or any string such as
    /// `Pair::BTC_USD`.
    pub async fn ticker(&self, pair: impl AsRef<str>) -> RestResult<Ticker> {
        self.market().ticker(pair.as_ref()).await
    }

    /// Get recent public trades for a pair
    pub async fn trades(&self, pair: impl AsRef<str>) -> RestResult<Vec<PublicTrade>> {
        self.market().trades(pair.as_ref()).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        Ok(AccountEndpoints::new(self.private_api()?))
    }

    /// Get balances, key rights and counters
    pub async fn get_info(&self) -> RestResult<ResultEnvelope<AccountInfo>> {
        self.account()?.get_info().await
    }

    /// Get balance movements
    pub async fn transaction_history(
        &self,
        query: &TransHistoryQuery,
    ) -> RestResult<ResultEnvelope<TransactionHistory>> {
        self.account()?.transaction_history(query).await
    }

    /// Get executed trades
    pub async fn trade_history(
        &self,
        query: &TradeHistoryQuery,
    ) -> RestResult<ResultEnvelope<TradeHistory>> {
        self.account()?.trade_history(query).await
    }

    /// Get orders
    pub async fn order_list(&self, query: &OrderListQuery) -> RestResult<ResultEnvelope<OrderList>> {
        self.account()?.order_list(query).await
    }

    /// Get orders still on the book
    pub async fn active_orders(&self, pair: Option<&str>) -> RestResult<ResultEnvelope<OrderList>> {
        self.account()?.active_orders(pair).await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        Ok(TradingEndpoints::new(self.private_api()?))
    }

    /// Place a limit order
    pub async fn trade(
        &self,
        pair: impl AsRef<str>,
        trade_type: TradeType,
        rate: Decimal,
        amount: Decimal,
    ) -> RestResult<ResultEnvelope<TradeResult>> {
        self.trading()?
            .trade(pair.as_ref(), trade_type, rate, amount)
            .await
    }

    /// Cancel an order (`CancelOrder`)
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<ResultEnvelope<CancelOrderResult>> {
        self.trading()?.cancel_order(order_id).await
    }
}

impl std::fmt::Debug for BtceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BtceClient")
            .field("has_credentials", &self.has_credentials())
            .field("api_url", &self.inner.api_url)
            .field("public_url", &self.inner.public_url)
            .finish()
    }
}
