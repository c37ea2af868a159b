//! Unit tests for score post-processing

use tradesight::models::signal::{SignalClass, SignalProbability};
use tradesight::signals::scoring::*;

#[test]
fn test_classify_hysteresis() {
    assert_eq!(classify(30.0, 15.0), SignalClass::Hold);
    assert_eq!(classify(31.0, 15.0), SignalClass::Buy);
    assert_eq!(classify(15.0, 30.0), SignalClass::Hold);
    assert_eq!(classify(15.0, 31.0), SignalClass::Sell);
    assert_eq!(classify(0.0, 0.0), SignalClass::Hold);
}

#[test]
fn test_strength_is_capped() {
    assert_eq!(strength(raw_strength(45.0, 25.0)), 20.0);
    assert_eq!(strength(raw_strength(0.0, 135.0)), 100.0);
    assert_eq!(raw_strength(0.0, 135.0), 135.0);
}

#[test]
fn test_probability_shares() {
    assert_eq!(probability(45.0, 25.0), SignalProbability { up: 64, down: 36 });
    assert_eq!(probability(10.0, 10.0), SignalProbability { up: 50, down: 50 });
    assert_eq!(probability(0.0, 30.0), SignalProbability { up: 0, down: 100 });
}

#[test]
fn test_probability_rounds_each_side() {
    assert_eq!(probability(10.0, 20.0), SignalProbability { up: 33, down: 67 });
    // 1/8 and 7/8 both round half up, so the pair need not sum to 100.
    let p = probability(1.0, 7.0);
    assert_eq!(p, SignalProbability { up: 13, down: 88 });
}

#[test]
fn test_probability_zero_total() {
    assert_eq!(probability(0.0, 0.0), SignalProbability { up: 0, down: 0 });
}

#[test]
fn test_confidence_bounds() {
    assert_eq!(confidence(0.0, 0), 50.0);
    assert_eq!(confidence(40.0, 3), 55.0);
    assert_eq!(confidence(80.0, 5), 95.0);
    assert_eq!(confidence(20.0, 1), 50.0);
}

#[test]
fn test_price_target_uses_uncapped_gap() {
    let target = price_target(100.0, 20.0);
    assert!((target.bullish - 102.0).abs() < 1e-9);
    assert!((target.bearish - 98.0).abs() < 1e-9);

    let target = price_target(100.0, 150.0);
    assert!((target.bullish - 115.0).abs() < 1e-9);
    assert!((target.bearish - 85.0).abs() < 1e-9);

    let target = price_target(250.0, 0.0);
    assert_eq!(target.bullish, 250.0);
    assert_eq!(target.bearish, 250.0);
}
