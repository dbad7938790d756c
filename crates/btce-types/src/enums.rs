//! Trade type, sort order and trade side enums

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order direction for `Trade` requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    /// Buy the base currency
    Buy,
    /// Sell the base currency
    Sell,
}

impl TradeType {
    /// Returns the value as sent to the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    /// Returns the opposite direction
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = TradeTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            _ => Err(TradeTypeParseError(s.to_string())),
        }
    }
}

/// Unknown trade type string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown trade type: {0}")]
pub struct TradeTypeParseError(pub String);

/// Result ordering for history and order list queries
///
/// The exchange defaults to `Desc` when no order is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the value as sent to the API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Side of a public trade as reported by the trade feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    /// Trade hit a bid (seller initiated)
    Bid,
    /// Trade lifted an ask (buyer initiated)
    Ask,
}

impl TradeSide {
    /// Trade type of the taker that produced this trade
    pub fn taker_type(&self) -> TradeType {
        match self {
            Self::Ask => TradeType::Buy,
            Self::Bid => TradeType::Sell,
        }
    }
}
