//! Currency pair identifiers (btc_usd format)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency pair in the exchange's `<base>_<quote>` lowercase format
///
/// The exchange validates pairs itself; this type only checks the shape
/// when parsed and otherwise passes the string through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pair(String);

impl Pair {
    /// BTC/USD
    pub const BTC_USD: &'static str = "btc_usd";
    /// BTC/RUR
    pub const BTC_RUR: &'static str = "btc_rur";
    /// BTC/EUR
    pub const BTC_EUR: &'static str = "btc_eur";
    /// LTC/BTC
    pub const LTC_BTC: &'static str = "ltc_btc";
    /// LTC/USD
    pub const LTC_USD: &'static str = "ltc_usd";
    /// LTC/RUR
    pub const LTC_RUR: &'static str = "ltc_rur";
    /// NMC/BTC
    pub const NMC_BTC: &'static str = "nmc_btc";
    /// USD/RUR
    pub const USD_RUR: &'static str = "usd_rur";
    /// EUR/USD
    pub const EUR_USD: &'static str = "eur_usd";
    /// NVC/BTC
    pub const NVC_BTC: &'static str = "nvc_btc";
    /// TRC/BTC
    pub const TRC_BTC: &'static str = "trc_btc";
    /// PPC/BTC
    pub const PPC_BTC: &'static str = "ppc_btc";
    /// FTC/BTC
    pub const FTC_BTC: &'static str = "ftc_btc";
    /// CNC/BTC
    pub const CNC_BTC: &'static str = "cnc_btc";

    /// Create a pair without validation
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the pair as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Base currency (e.g., "btc" from "btc_usd")
    pub fn base(&self) -> Option<&str> {
        self.0.split('_').next()
    }

    /// Quote currency (e.g., "usd" from "btc_usd")
    pub fn quote(&self) -> Option<&str> {
        self.0.split('_').nth(1)
    }
}

impl FromStr for Pair {
    type Err = PairParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('_').collect();
        if parts.len() != 2 {
            return Err(PairParseError::InvalidFormat(s.to_string()));
        }
        if parts[0].is_empty() || parts[1].is_empty() {
            return Err(PairParseError::EmptyPart(s.to_string()));
        }

        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Pair {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Pair {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<Pair> for String {
    fn from(pair: Pair) -> Self {
        pair.0
    }
}

/// Pair parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairParseError {
    /// Not exactly two parts separated by '_'
    #[error("invalid pair format: {0} (expected base_quote)")]
    InvalidFormat(String),
    /// Base or quote is empty
    #[error("empty currency in pair: {0}")]
    EmptyPart(String),
}
