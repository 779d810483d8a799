//! Unit tests for rolling and smoothing helpers

use coincast::common::math::{ema_series, rolling_mean, rolling_sample_std};

use crate::fixtures::approx;

#[test]
fn test_ema_seeded_with_first_value() {
    // span 3 -> alpha 0.5
    let out = ema_series(&[10.0, 20.0, 20.0], 3).unwrap();
    assert_eq!(out[0], 10.0);
    assert!(approx(out[1], 15.0));
    assert!(approx(out[2], 17.5));
}

#[test]
fn test_ema_span_one_tracks_input() {
    let values = [2.0, 4.0, 6.0];
    assert_eq!(ema_series(&values, 1).unwrap(), values.to_vec());
}

#[test]
fn test_rolling_sample_std_uses_n_minus_one() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let out = rolling_sample_std(&values, values.len()).unwrap();
    let last = out.last().copied().flatten().unwrap();
    // population std is exactly 2.0; the sample estimator is sqrt(32 / 7)
    assert!(approx(last, (32.0_f64 / 7.0).sqrt()));
    assert!(out[..values.len() - 1].iter().all(Option::is_none));
}

#[test]
fn test_rolling_std_window_of_one_is_undefined() {
    let out = rolling_sample_std(&[1.0, 2.0, 3.0], 1).unwrap();
    assert!(out.iter().all(Option::is_none));
}

#[test]
fn test_rolling_mean_on_empty_input() {
    assert!(rolling_mean(&[], 20).unwrap().is_empty());
}
