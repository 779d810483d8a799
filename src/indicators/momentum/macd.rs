//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::indicators::IndicatorError;

#[derive(Debug, Clone, PartialEq)]
pub struct MacdColumns {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
}

/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
///
/// All three EMAs use first-value seeding.
pub fn macd_series(
    prices: &[f64],
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<MacdColumns, IndicatorError> {
    let fast_ema = math::ema_series(prices, fast)?;
    let slow_ema = math::ema_series(prices, slow)?;

    let macd: Vec<f64> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| f - s)
        .collect();
    let signal_line = math::ema_series(&macd, signal)?;

    Ok(MacdColumns {
        macd: macd.into_iter().map(Some).collect(),
        signal: signal_line.into_iter().map(Some).collect(),
    })
}
