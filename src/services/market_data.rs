//! Market data provider interface.

use crate::models::asset::{Asset, AssetType};
use crate::models::market::{PriceSeries, SeriesError};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Invalid price series: {0}")]
    InvalidSeries(#[from] SeriesError),

    #[error("Decode error: {0}")]
    Decode(String),
}

impl MarketDataError {
    /// Transport failures, throttling and 5xx responses are worth another try.
    pub fn is_retryable(&self) -> bool {
        match self {
            MarketDataError::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            MarketDataError::Api { status_code, .. } => {
                *status_code == 429 || (500..600).contains(status_code)
            }
            MarketDataError::UnknownSymbol(_)
            | MarketDataError::InvalidSeries(_)
            | MarketDataError::Decode(_) => false,
        }
    }
}

/// Source of quotes, price history and symbol search.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Latest quote for a symbol.
    async fn fetch_quote(&self, symbol: &str, asset_type: AssetType)
        -> Result<Asset, MarketDataError>;

    /// Daily price history for a symbol, oldest first.
    async fn fetch_history(&self, symbol: &str) -> Result<PriceSeries, MarketDataError>;

    /// Listings whose symbol matches `query`.
    async fn search(&self, query: &str, asset_type: AssetType)
        -> Result<Vec<Asset>, MarketDataError>;
}
