//! Analysis orchestration: indicators, then signal, then packaging.

use crate::core::clock::Clock;
use crate::indicators::IndicatorEngine;
use crate::models::asset::{Asset, AssetAnalysis, AssetType};
use crate::models::market::PriceSeries;
use crate::services::market_data::{MarketDataError, MarketDataProvider};
use crate::signals::SignalEngine;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AnalysisOrchestrator {
    clock: Arc<dyn Clock>,
}

impl AnalysisOrchestrator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Run the full pipeline on a series that is already in hand.
    pub fn analyze(&self, asset: Asset, series: PriceSeries) -> AssetAnalysis {
        let indicators = IndicatorEngine::compute(&series);
        let signal = SignalEngine::generate(&series, &indicators);

        AssetAnalysis {
            asset,
            indicators,
            signal,
            price_history: series,
            computed_at: self.clock.now(),
        }
    }

    /// Fetch the price history for `asset` and analyze it.
    pub async fn analyze_asset(
        &self,
        provider: &dyn MarketDataProvider,
        asset: Asset,
    ) -> Result<AssetAnalysis, MarketDataError> {
        let series = provider.fetch_history(&asset.symbol).await?;
        if series.is_empty() {
            warn!(symbol = %asset.symbol, "Empty price history, indicators fall back to defaults");
        }

        let analysis = self.analyze(asset, series);
        info!(
            symbol = %analysis.asset.symbol,
            asset_type = %analysis.asset.asset_type,
            classification = %analysis.signal.classification,
            strength = analysis.signal.strength,
            "Analysis complete"
        );
        Ok(analysis)
    }

    /// Fetch a fresh quote and history for a symbol and analyze it.
    pub async fn analyze_symbol(
        &self,
        provider: &dyn MarketDataProvider,
        symbol: &str,
        asset_type: AssetType,
    ) -> Result<AssetAnalysis, MarketDataError> {
        let asset = provider.fetch_quote(symbol, asset_type).await?;
        self.analyze_asset(provider, asset).await
    }

    /// Analyze several assets concurrently. Results keep the input order and
    /// one failing asset does not affect the others.
    pub async fn analyze_many(
        &self,
        provider: &dyn MarketDataProvider,
        targets: &[(String, AssetType)],
    ) -> Vec<Result<AssetAnalysis, MarketDataError>> {
        let results = join_all(
            targets
                .iter()
                .map(|(symbol, asset_type)| self.analyze_symbol(provider, symbol, *asset_type)),
        )
        .await;

        for ((symbol, asset_type), result) in targets.iter().zip(&results) {
            if let Err(e) = result {
                warn!(symbol = %symbol, asset_type = %asset_type, error = %e, "Analysis failed");
            }
        }

        results
    }
}
