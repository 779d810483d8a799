//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::indicators::IndicatorError;

/// EMA for every row, seeded with the first price.
///
/// Because the seed is the first observation, the column is defined from
/// row 0 onward. Short series therefore differ from an SMA-seeded EMA.
pub fn ema_series(prices: &[f64], span: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    Ok(math::ema_series(prices, span)?.into_iter().map(Some).collect())
}

/// Latest EMA value, if any.
pub fn latest_ema(prices: &[f64], span: usize) -> Result<Option<f64>, IndicatorError> {
    Ok(math::ema_series(prices, span)?.last().copied())
}
