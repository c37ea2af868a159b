//! Volume statistics

use crate::common::math;
use crate::models::market::PriceSeries;

/// Mean volume over the full series. Missing volumes count as 0.
pub fn calculate_average_volume(series: &PriceSeries) -> f64 {
    math::mean(&series.volumes()).unwrap_or(0.0)
}

/// Sum of the last `window` volumes divided by `window`.
///
/// The divisor stays `window` even when the series is shorter.
pub fn calculate_recent_volume(series: &PriceSeries, window: usize) -> f64 {
    if window == 0 {
        return 0.0;
    }
    let volumes = series.volumes();
    let start = volumes.len().saturating_sub(window);
    volumes[start..].iter().sum::<f64>() / window as f64
}
