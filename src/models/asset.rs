use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::indicators::IndicatorSet;
use super::market::PriceSeries;
use super::signal::TradingSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Stock,
    Crypto,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Stock => "stock",
            AssetType::Crypto => "crypto",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stock" => Ok(AssetType::Stock),
            "crypto" => Ok(AssetType::Crypto),
            other => Err(format!("unknown asset type: {}", other)),
        }
    }
}

/// Quote-level identity of a tradable asset. Prices are in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub price: f64,
    pub change24h: f64,
    pub change_percent24h: f64,
}

impl Asset {
    /// Placeholder asset carrying identity only, as returned by search.
    pub fn listing(
        symbol: impl Into<String>,
        name: impl Into<String>,
        asset_type: AssetType,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            asset_type,
            price: 0.0,
            change24h: 0.0,
            change_percent24h: 0.0,
        }
    }

    /// Watchlist identity: (symbol, type).
    pub fn key(&self) -> (&str, AssetType) {
        (&self.symbol, self.asset_type)
    }
}

/// Output of one orchestration call. Recomputed on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAnalysis {
    pub asset: Asset,
    pub indicators: IndicatorSet,
    pub signal: TradingSignal,
    pub price_history: PriceSeries,
    pub computed_at: DateTime<Utc>,
}
