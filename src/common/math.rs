//! Rolling-window statistics over plain `f64` slices.

/// Arithmetic mean of the whole slice.
///
/// Accumulates offsets from the first value, so a constant slice yields that
/// value exactly.
pub fn mean(values: &[f64]) -> Option<f64> {
    let (&first, _) = values.split_first()?;
    let offset = values.iter().map(|v| v - first).sum::<f64>() / values.len() as f64;
    Some(first + offset)
}

/// Simple moving average of the trailing `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    mean(&values[values.len() - period..])
}

/// Population standard deviation of the trailing `period` values.
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    let avg = sma(values, period)?;
    let window = &values[values.len() - period..];
    let variance = window.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / period as f64;
    Some(variance.sqrt())
}

/// Smoothing factor k = 2 / (period + 1).
pub fn ema_multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// One EMA step from the previous value.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    previous + ema_multiplier(period) * (value - previous)
}

/// Full EMA series, seeded with the SMA of the first `period` values.
///
/// Element `i` of the result lines up with `values[i + period - 1]`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let Some(seed) = mean(&values[..period]) else {
        return Vec::new();
    };
    let mut series = Vec::with_capacity(values.len() - period + 1);
    series.push(seed);

    let mut previous = seed;
    for &value in &values[period..] {
        previous = ema_from_previous(value, previous, period);
        series.push(previous);
    }
    series
}

/// Most recent EMA value.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    ema_series(values, period).last().copied()
}
