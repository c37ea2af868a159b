//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::trend::{calculate_ema, calculate_ema_series};
use crate::models::indicators::MacdIndicator;

pub const DEFAULT_FAST_PERIOD: usize = 12;
pub const DEFAULT_SLOW_PERIOD: usize = 26;
pub const DEFAULT_SIGNAL_PERIOD: usize = 9;

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of the MACD line
/// Histogram = MACD - Signal
///
/// Fewer than `slow_period` prices yields all zeros. While the MACD line is
/// still shorter than `signal_period`, only the MACD value is reported and
/// signal/histogram stay at 0.
pub fn calculate_macd(
    prices: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdIndicator {
    if fast_period == 0 || fast_period > slow_period || prices.len() < slow_period {
        return MacdIndicator::default();
    }

    let fast = calculate_ema_series(prices, fast_period);
    let slow = calculate_ema_series(prices, slow_period);

    // fast[i + offset] and slow[i] refer to the same price index.
    let offset = slow_period - fast_period;
    let macd_line: Vec<f64> = slow
        .iter()
        .enumerate()
        .map(|(i, slow_value)| fast[i + offset] - slow_value)
        .collect();

    let macd = macd_line.last().copied().unwrap_or(0.0);
    match calculate_ema(&macd_line, signal_period) {
        Some(signal) => MacdIndicator {
            macd,
            signal,
            histogram: macd - signal,
        },
        None => MacdIndicator {
            macd,
            signal: 0.0,
            histogram: 0.0,
        },
    }
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(prices: &[f64]) -> MacdIndicator {
    calculate_macd(
        prices,
        DEFAULT_FAST_PERIOD,
        DEFAULT_SLOW_PERIOD,
        DEFAULT_SIGNAL_PERIOD,
    )
}
