//! Unit tests for Bollinger Bands

use coincast::indicators::volatility::bollinger_series;

use crate::fixtures::{approx, ramp};

#[test]
fn test_bollinger_flat_prices_collapse() {
    let bands = bollinger_series(&[10.0; 25], 20, 2.0).unwrap();
    let i = 24;
    assert_eq!(bands.middle[i], Some(10.0));
    assert_eq!(bands.upper[i], Some(10.0));
    assert_eq!(bands.lower[i], Some(10.0));
}

#[test]
fn test_bollinger_uses_sample_deviation() {
    let prices = ramp(20, 1.0, 1.0);
    let bands = bollinger_series(&prices, 20, 2.0).unwrap();
    // sample variance of 1..=20 is 20 * 21 / 12 = 35
    let sd = 35.0_f64.sqrt();
    assert!(approx(bands.middle[19].unwrap(), 10.5));
    assert!(approx(bands.upper[19].unwrap(), 10.5 + 2.0 * sd));
    assert!(approx(bands.lower[19].unwrap(), 10.5 - 2.0 * sd));
}

#[test]
fn test_bollinger_insufficient_data() {
    let bands = bollinger_series(&ramp(10, 1.0, 1.0), 20, 2.0).unwrap();
    assert!(bands.middle.iter().all(Option::is_none));
    assert!(bands.upper.iter().all(Option::is_none));
}
