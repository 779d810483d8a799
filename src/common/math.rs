//! Rolling-window and exponential smoothing primitives.
//!
//! Every function returns one output per input, aligned by index. Rolling
//! outputs are `None` until the window is full.

use crate::indicators::IndicatorError;

/// Trailing arithmetic mean over `window` values.
pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    IndicatorError::check_window("rolling_mean", window)?;
    Ok(rolling(values, window, mean))
}

/// Trailing sample standard deviation (N-1 denominator) over `window` values.
///
/// A window of 1 has no sample deviation and yields `None` everywhere.
pub fn rolling_sample_std(
    values: &[f64],
    window: usize,
) -> Result<Vec<Option<f64>>, IndicatorError> {
    IndicatorError::check_window("rolling_sample_std", window)?;
    if window == 1 {
        return Ok(vec![None; values.len()]);
    }
    Ok(rolling(values, window, sample_std))
}

/// Exponential moving average with `alpha = 2 / (span + 1)`, seeded with the
/// first value rather than a simple average of the first `span` values.
pub fn ema_series(values: &[f64], span: usize) -> Result<Vec<f64>, IndicatorError> {
    IndicatorError::check_window("ema", span)?;
    let alpha = 2.0 / (span as f64 + 1.0);

    let mut out = Vec::with_capacity(values.len());
    let mut prev: Option<f64> = None;
    for &value in values {
        let next = match prev {
            None => value,
            Some(p) => alpha * value + (1.0 - alpha) * p,
        };
        out.push(next);
        prev = Some(next);
    }
    Ok(out)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation. Requires at least two values.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

fn rolling<F>(values: &[f64], window: usize, reduce: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                Some(reduce(&values[i + 1 - window..=i]))
            }
        })
        .collect()
}
