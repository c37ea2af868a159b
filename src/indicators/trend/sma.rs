//! SMA (Simple Moving Average) indicator

use crate::common::math;

/// Mean of the trailing `period` prices.
///
/// Falls back to the last price (0 for an empty slice) when the window is not
/// filled.
pub fn calculate_sma(prices: &[f64], period: usize) -> f64 {
    math::sma(prices, period).unwrap_or_else(|| prices.last().copied().unwrap_or(0.0))
}
