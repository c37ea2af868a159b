//! REST market data provider.
//!
//! Expects a JSON API exposing:
//! - `GET {base}/quote/{type}/{symbol}` returning an [`Asset`]
//! - `GET {base}/history/{symbol}` returning an array of price points
//! - `GET {base}/search?q=..&type=..` returning an array of [`Asset`]

use crate::models::asset::{Asset, AssetType};
use crate::models::market::{PricePoint, PriceSeries};
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub struct RestMarketDataProvider {
    base_url: String,
    client: reqwest::Client,
    max_retries: usize,
}

impl RestMarketDataProvider {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        max_retries: usize,
    ) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client, max_retries))
    }

    pub fn with_client(
        base_url: impl Into<String>,
        client: reqwest::Client,
        max_retries: usize,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            max_retries,
        }
    }

    async fn get_json_once<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MarketDataError> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MarketDataError::UnknownSymbol(url.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MarketDataError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| MarketDataError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<T, MarketDataError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(100))
            .with_max_times(self.max_retries);

        (|| self.get_json_once(&url, query))
            .retry(backoff)
            .when(|e: &MarketDataError| e.is_retryable())
            .notify(|e: &MarketDataError, delay: Duration| {
                warn!(
                    url = %url,
                    error = %e,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying market data request"
                );
            })
            .await
    }
}

/// 404s are reported against the requested symbol rather than the URL.
fn with_symbol(error: MarketDataError, symbol: &str) -> MarketDataError {
    match error {
        MarketDataError::UnknownSymbol(_) => MarketDataError::UnknownSymbol(symbol.to_string()),
        other => other,
    }
}

#[async_trait]
impl MarketDataProvider for RestMarketDataProvider {
    async fn fetch_quote(
        &self,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<Asset, MarketDataError> {
        let url = format!("{}/quote/{}/{}", self.base_url, asset_type, symbol);
        debug!(url = %url, "RestMarketDataProvider: fetching quote");
        self.get_json(url, &[]).await.map_err(|e| with_symbol(e, symbol))
    }

    async fn fetch_history(&self, symbol: &str) -> Result<PriceSeries, MarketDataError> {
        let url = format!("{}/history/{}", self.base_url, symbol);
        debug!(url = %url, "RestMarketDataProvider: fetching history");
        let points: Vec<PricePoint> = self
            .get_json(url, &[])
            .await
            .map_err(|e| with_symbol(e, symbol))?;
        Ok(PriceSeries::new(points)?)
    }

    async fn search(
        &self,
        query: &str,
        asset_type: AssetType,
    ) -> Result<Vec<Asset>, MarketDataError> {
        let url = format!("{}/search", self.base_url);
        self.get_json(url, &[("q", query), ("type", asset_type.as_str())])
            .await
    }
}
