//! EMA (Exponential Moving Average) indicator

use crate::common::math;

/// Calculate EMA for a specific period, `None` until `period` values exist.
pub fn calculate_ema(values: &[f64], period: usize) -> Option<f64> {
    math::ema(values, period)
}

/// Every EMA value from the seed onwards; element 0 lines up with
/// `values[period - 1]`.
pub fn calculate_ema_series(values: &[f64], period: usize) -> Vec<f64> {
    math::ema_series(values, period)
}
