//! Unit tests for RSI indicator

use tradesight::indicators::momentum::{calculate_rsi, calculate_rsi_default, NEUTRAL_RSI};

fn zigzag(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1)
        .collect()
}

#[test]
fn test_rsi_insufficient_data() {
    let prices: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
    assert_eq!(calculate_rsi_default(&prices), NEUTRAL_RSI);
    assert_eq!(calculate_rsi_default(&[]), NEUTRAL_RSI);
}

#[test]
fn test_rsi_only_gains_is_100() {
    let prices: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
    assert_eq!(calculate_rsi_default(&prices), 100.0);
}

#[test]
fn test_rsi_only_losses_is_0() {
    let prices: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
    assert_eq!(calculate_rsi_default(&prices), 0.0);
}

#[test]
fn test_rsi_flat_series_is_neutral() {
    assert_eq!(calculate_rsi_default(&[42.0; 40]), NEUTRAL_RSI);
}

#[test]
fn test_rsi_wilder_smoothing() {
    // Seed over the first two deltas (+1, -1): gain 0.5, loss 0.5.
    // Third delta +1: gain (0.5 + 1) / 2 = 0.75, loss 0.5 / 2 = 0.25, RS = 3.
    let rsi = calculate_rsi(&[1.0, 2.0, 1.0, 2.0], 2);
    assert!((rsi - 75.0).abs() < 1e-12);
}

#[test]
fn test_rsi_stays_in_range() {
    for len in [15, 16, 30, 100, 250] {
        let rsi = calculate_rsi_default(&zigzag(len));
        assert!((0.0..=100.0).contains(&rsi), "rsi {} out of range", rsi);
    }
}
