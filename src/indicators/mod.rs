//! Technical indicators computed from a price series.
//!
//! Every function here is total: short or empty input yields a documented
//! fallback instead of an error.

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use momentum::*;
pub use trend::*;
pub use volatility::*;
pub use volume::*;

use crate::models::indicators::IndicatorSet;
use crate::models::market::PriceSeries;
use tracing::debug;

pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Compute the full indicator set for a series.
    pub fn compute(series: &PriceSeries) -> IndicatorSet {
        let prices = series.prices();

        let indicators = IndicatorSet {
            rsi: calculate_rsi_default(&prices),
            macd: calculate_macd_default(&prices),
            sma20: calculate_sma(&prices, 20),
            sma50: calculate_sma(&prices, 50),
            sma200: calculate_sma(&prices, 200),
            bollinger: calculate_bollinger_bands_default(&prices),
            volume: calculate_average_volume(series),
        };

        debug!(
            points = series.len(),
            rsi = indicators.rsi,
            macd_histogram = indicators.macd.histogram,
            "IndicatorEngine: computed indicators"
        );

        indicators
    }
}
