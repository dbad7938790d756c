//! Common test utilities and fixtures for integration tests
//!
//! Response bodies follow the shapes returned by the live trade and public
//! APIs.

#![allow(dead_code)]

use std::sync::Arc;

use btce_rest::{BtceClient, ClientConfig, Credentials, MockTransport, RateLimitConfig, RecordedRequest};

pub const API_KEY: &str = "46G9R9D6-WJ77XOIP-XH9HH5VQ-A3XN3YOZ-8T1R8I8T";
pub const API_SECRET: &str = "7a4d1f7ed1a3b1f1c9c1b7d7d5f7e8c3a9b0e4f2d6c8a1b3e5f7d9c2b4a6e8f0";
pub const API_URL: &str = "https://exchange.test/tapi";
pub const PUBLIC_URL: &str = "https://exchange.test/api/2";

/// Sample `getInfo` response
pub const INFO_RESPONSE: &str = r#"{
    "success": 1,
    "return": {
        "funds": {"usd": 325, "btc": 23.998, "ltc": 0, "nmc": 0, "rur": 0, "eur": 0},
        "rights": {"info": 1, "trade": 1, "withdraw": 0},
        "transaction_count": 80,
        "open_orders": 1,
        "server_time": 1342123547
    }
}"#;

/// Sample `OrderList` response with a single order and no `status`
pub const ORDER_LIST_RESPONSE: &str = r#"{"success":1,"return":{"123":{"pair":"btc_usd","type":"buy","amount":0.5,"rate":100.0,"timestamp":1600000000}}}"#;

/// Sample `TradeHistory` response, ids deliberately out of order
pub const TRADE_HISTORY_RESPONSE: &str = r#"{
    "success": 1,
    "return": {
        "166830": {"pair":"btc_usd","type":"sell","amount":1,"rate":1,"order_id":343148,"is_your_order":1,"timestamp":1342445793},
        "166829": {"pair":"btc_usd","type":"buy","amount":0.25,"rate":101.5,"order_id":343147,"is_your_order":0,"timestamp":1342445700},
        "166900": {"pair":"ltc_btc","type":"buy","amount":10,"rate":0.025,"order_id":343200,"is_your_order":0,"timestamp":1342446000}
    }
}"#;

/// Sample `TransHistory` response
pub const TRANS_HISTORY_RESPONSE: &str = r#"{"success":1,"return":{"1081672":{"type":1,"amount":1.0,"currency":"BTC","desc":"BTC Payment","status":2,"timestamp":1342448420}}}"#;

/// Sample `Trade` response
pub const TRADE_RESPONSE: &str = r#"{"success":1,"return":{"received":0.1,"remains":0.4,"order_id":343152,"funds":{"usd":275,"btc":24.098}}}"#;

/// Sample `CancelOrder` response
pub const CANCEL_RESPONSE: &str = r#"{"success":1,"return":{"order_id":343154,"funds":{"usd":325,"btc":24.998}}}"#;

/// Empty history (the exchange answers with an error for no rows)
pub const NO_ORDERS_RESPONSE: &str = r#"{"success":0,"error":"no orders"}"#;

/// Rejected nonce
pub const INVALID_NONCE_RESPONSE: &str = r#"{"success":0,"error":"invalid nonce parameter; on key:4000000000, you sent:'3'"}"#;

/// Sample public ticker
pub const TICKER_RESPONSE: &str = r#"{"ticker":{"high":109.88,"low":91.14,"avg":100.51,"vol":1632898.2249,"vol_cur":16541.51969,"last":101.773,"buy":101.9,"sell":101.773,"updated":1370816308,"server_time":1370816309}}"#;

/// Sample public trade feed
pub const TRADES_RESPONSE: &str = r#"[
    {"date":1370816191,"price":101.773,"amount":0.0195,"tid":7150364,"price_currency":"USD","item":"BTC","trade_type":"bid"},
    {"date":1370816190,"price":101.9,"amount":2,"tid":7150363,"price_currency":"USD","item":"BTC","trade_type":"ask"}
]"#;

/// Public API error body
pub const PUBLIC_ERROR_RESPONSE: &str = r#"{"error":"invalid pair"}"#;

/// Mock transport with no queued responses
pub fn mock() -> Arc<MockTransport> {
    Arc::new(MockTransport::new())
}

/// Queue the same body `n` times
pub fn push_n(transport: &MockTransport, body: &str, n: usize) {
    for _ in 0..n {
        transport.push_response(body);
    }
}

/// Nonces of the recorded trade API requests, in send order
pub fn sent_nonces(transport: &MockTransport) -> Vec<u64> {
    transport
        .requests()
        .iter()
        .filter_map(RecordedRequest::nonce)
        .collect()
}

/// Config pointing at the test URLs with pacing disabled
pub fn test_config() -> ClientConfig {
    ClientConfig::new()
        .with_api_url(API_URL)
        .with_public_url(PUBLIC_URL)
        .with_rate_limits(RateLimitConfig::permissive())
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET).unwrap()
}

/// Authenticated client over `transport`
pub fn auth_client(transport: &Arc<MockTransport>) -> BtceClient {
    BtceClient::with_transport(test_config().with_credentials(credentials()), transport.clone()).unwrap()
}

/// Public-only client over `transport`
pub fn public_client(transport: &Arc<MockTransport>) -> BtceClient {
    BtceClient::with_transport(test_config(), transport.clone()).unwrap()
}

/// Hex HMAC-SHA512 computed without the crate's signer
pub fn reference_signature(secret: &str, body: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha512;

    let mut mac = Hmac::<Sha512>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
