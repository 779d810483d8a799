//! Unit tests for MACD indicator

use coincast::common::math;
use coincast::indicators::momentum::macd_series;

use crate::fixtures::{approx, ramp};

#[test]
fn test_macd_constant_series_is_zero() {
    let macd = macd_series(&[50.0; 80], 20, 50, 9).unwrap();
    assert!(macd.macd.iter().all(|v| *v == Some(0.0)));
    assert!(macd.signal.iter().all(|v| *v == Some(0.0)));
}

#[test]
fn test_macd_is_difference_of_emas() {
    let prices = ramp(120, 100.0, 0.5);
    let macd = macd_series(&prices, 20, 50, 9).unwrap();
    let fast = math::ema_series(&prices, 20).unwrap();
    let slow = math::ema_series(&prices, 50).unwrap();
    for i in 0..prices.len() {
        assert!(approx(macd.macd[i].unwrap(), fast[i] - slow[i]));
    }
    // fast EMA sits above slow EMA on a rising series
    assert!(macd.macd.last().copied().flatten().unwrap() > 0.0);
}

#[test]
fn test_macd_signal_smooths_macd_line() {
    let prices = ramp(60, 10.0, 1.0);
    let macd = macd_series(&prices, 20, 50, 9).unwrap();
    let line: Vec<f64> = macd.macd.iter().map(|v| v.unwrap()).collect();
    let expected = math::ema_series(&line, 9).unwrap();
    for (got, want) in macd.signal.iter().zip(expected) {
        assert!(approx(got.unwrap(), want));
    }
}
