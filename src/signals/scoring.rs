//! Turning raw buy/sell scores into classification, probabilities and targets

use crate::models::signal::{PriceTarget, SignalClass, SignalProbability};

/// A side must lead by more than this many points to leave HOLD.
pub const HYSTERESIS_BAND: f64 = 15.0;

pub const MAX_STRENGTH: f64 = 100.0;
pub const MIN_CONFIDENCE: f64 = 50.0;
pub const MAX_CONFIDENCE: f64 = 95.0;

/// Bonus confidence per reasoning entry.
pub const CONFIDENCE_PER_REASON: f64 = 5.0;

/// Price move implied by a full 100-point score gap.
pub const TARGET_RANGE: f64 = 0.1;

pub fn classify(buy_score: f64, sell_score: f64) -> SignalClass {
    if buy_score > sell_score + HYSTERESIS_BAND {
        SignalClass::Buy
    } else if sell_score > buy_score + HYSTERESIS_BAND {
        SignalClass::Sell
    } else {
        SignalClass::Hold
    }
}

/// Absolute score gap, uncapped.
pub fn raw_strength(buy_score: f64, sell_score: f64) -> f64 {
    (buy_score - sell_score).abs()
}

pub fn strength(raw_strength: f64) -> f64 {
    raw_strength.min(MAX_STRENGTH)
}

/// Each side's share of the total score, rounded independently.
pub fn probability(buy_score: f64, sell_score: f64) -> SignalProbability {
    let total = buy_score + sell_score;
    let total = if total == 0.0 { 1.0 } else { total };
    SignalProbability {
        up: to_percent(buy_score / total),
        down: to_percent(sell_score / total),
    }
}

fn to_percent(share: f64) -> u8 {
    (share * 100.0).round().clamp(0.0, 100.0) as u8
}

pub fn confidence(raw_strength: f64, reason_count: usize) -> f64 {
    (raw_strength + reason_count as f64 * CONFIDENCE_PER_REASON)
        .clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Symmetric targets around the current price, scaled by the uncapped gap.
pub fn price_target(price: f64, raw_strength: f64) -> PriceTarget {
    let offset = raw_strength / 100.0 * TARGET_RANGE;
    PriceTarget {
        bullish: price * (1.0 + offset),
        bearish: price * (1.0 - offset),
    }
}
