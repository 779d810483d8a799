//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::indicators::IndicatorError;

/// Trailing simple moving average, `None` for the first `period - 1` rows.
pub fn sma_series(prices: &[f64], period: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    math::rolling_mean(prices, period)
}
