//! Shared types for the BTC-e trade and public APIs
//!
//! This crate holds the identifiers and configuration shared by the
//! authentication and REST crates. It has minimal dependencies.
//!
//! # Key Types
//!
//! - [`Pair`] - Currency pair identifiers (e.g., "btc_usd")
//! - [`TradeType`], [`SortOrder`], [`TradeSide`] - Request and response enums
//! - [`RateLimitConfig`], [`RateLimitCategory`] - Client-side request pacing

pub mod enums;
pub mod pair;
pub mod rate_limit;

pub use enums::*;
pub use pair::*;
pub use rate_limit::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
