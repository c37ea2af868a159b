use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBandsIndicator {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBandsIndicator {
    /// Synthetic ±2% band used when the window is not filled yet.
    pub fn synthetic(price: f64) -> Self {
        Self {
            upper: price * 1.02,
            middle: price,
            lower: price * 0.98,
        }
    }
}

/// Every indicator the signal engine reads, computed from one price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub rsi: f64,
    pub macd: MacdIndicator,
    pub sma20: f64,
    pub sma50: f64,
    pub sma200: f64,
    pub bollinger: BollingerBandsIndicator,
    /// Mean volume over the whole series.
    pub volume: f64,
}
