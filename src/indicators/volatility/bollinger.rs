//! Bollinger Bands indicator

use crate::common::math;
use crate::models::indicators::BollingerBandsIndicator;

pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_STD_DEV: f64 = 2.0;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * standard deviation)
/// Lower Band = Middle - (std_dev * standard deviation)
///
/// The standard deviation is the population one over the SMA window. Without a
/// full window the band is a synthetic ±2% around the last price.
pub fn calculate_bollinger_bands(
    prices: &[f64],
    period: usize,
    std_dev: f64,
) -> BollingerBandsIndicator {
    let (middle, std) = match (
        math::sma(prices, period),
        math::standard_deviation(prices, period),
    ) {
        (Some(middle), Some(std)) => (middle, std),
        _ => {
            return BollingerBandsIndicator::synthetic(prices.last().copied().unwrap_or(0.0));
        }
    };

    let width = std_dev.abs() * std;
    BollingerBandsIndicator {
        upper: middle + width,
        middle,
        lower: middle - width,
    }
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(prices: &[f64]) -> BollingerBandsIndicator {
    calculate_bollinger_bands(prices, DEFAULT_BOLLINGER_PERIOD, DEFAULT_BOLLINGER_STD_DEV)
}
