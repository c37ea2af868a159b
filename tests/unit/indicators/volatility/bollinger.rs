//! Unit tests for Bollinger Bands

use tradesight::indicators::volatility::{
    calculate_bollinger_bands, calculate_bollinger_bands_default,
};

#[test]
fn test_bollinger_known_values() {
    let prices = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let bands = calculate_bollinger_bands(&prices, 8, 2.0);
    assert_eq!(bands.middle, 5.0);
    assert_eq!(bands.upper, 9.0);
    assert_eq!(bands.lower, 1.0);
}

#[test]
fn test_bollinger_synthetic_band() {
    let prices = [100.0, 101.0, 102.0];
    let bands = calculate_bollinger_bands_default(&prices);
    assert_eq!(bands.middle, 102.0);
    assert_eq!(bands.upper, 102.0 * 1.02);
    assert_eq!(bands.lower, 102.0 * 0.98);
}

#[test]
fn test_bollinger_empty_series() {
    let bands = calculate_bollinger_bands_default(&[]);
    assert_eq!((bands.upper, bands.middle, bands.lower), (0.0, 0.0, 0.0));
}

#[test]
fn test_bollinger_ordering_for_every_length() {
    let prices: Vec<f64> = (0..120)
        .map(|i| 50.0 + (i as f64 * 1.3).cos() * 4.0)
        .collect();
    for len in 0..prices.len() {
        let bands = calculate_bollinger_bands_default(&prices[..len]);
        assert!(bands.upper >= bands.middle, "len {}", len);
        assert!(bands.middle >= bands.lower, "len {}", len);
    }
}

#[test]
fn test_bollinger_collapses_on_constant_series() {
    for price in [0.1, 0.52, 14.8, 123.45] {
        let bands = calculate_bollinger_bands_default(&vec![price; 60]);
        assert_eq!(bands.upper, price);
        assert_eq!(bands.middle, price);
        assert_eq!(bands.lower, price);
    }
}
