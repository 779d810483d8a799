//! Builds the full indicator frame for one asset.

use serde::{Deserialize, Serialize};

use crate::indicators::momentum::{macd_series, rsi_series};
use crate::indicators::trend::{ema_series, sma_series};
use crate::indicators::volatility::bollinger_series;
use crate::indicators::IndicatorError;
use crate::models::{IndicatorFrame, IndicatorRow, PriceSeries};

/// Window sizes for every derived column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub sma_period: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub macd_signal: usize,
    pub bollinger_period: usize,
    pub bollinger_std_dev: f64,
    pub rsi_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_period: 20,
            ema_fast: 20,
            ema_slow: 50,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std_dev: 2.0,
            rsi_period: 14,
        }
    }
}

/// Compute the indicator frame with the standard parameter set.
///
/// An empty series yields an empty frame; callers skip the asset.
pub fn compute_indicators(series: &PriceSeries) -> IndicatorFrame {
    match compute_indicators_with(series, &IndicatorParams::default()) {
        Ok(frame) => frame,
        Err(e) => unreachable!("default indicator parameters are valid: {e}"),
    }
}

pub fn compute_indicators_with(
    series: &PriceSeries,
    params: &IndicatorParams,
) -> Result<IndicatorFrame, IndicatorError> {
    if series.is_empty() {
        return Ok(IndicatorFrame::empty());
    }

    let prices = series.prices();
    let sma = sma_series(&prices, params.sma_period)?;
    let ema_fast = ema_series(&prices, params.ema_fast)?;
    let ema_slow = ema_series(&prices, params.ema_slow)?;
    let macd = macd_series(&prices, params.ema_fast, params.ema_slow, params.macd_signal)?;
    let bands = bollinger_series(&prices, params.bollinger_period, params.bollinger_std_dev)?;
    let rsi = rsi_series(&prices, params.rsi_period)?;

    let rows = series
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| IndicatorRow {
            timestamp: point.timestamp,
            price: point.price,
            sma_20: sma[i],
            ema_20: ema_fast[i],
            ema_50: ema_slow[i],
            macd: macd.macd[i],
            macd_signal: macd.signal[i],
            bollinger_middle: bands.middle[i],
            bollinger_upper: bands.upper[i],
            bollinger_lower: bands.lower[i],
            rsi: rsi[i],
        })
        .collect();

    Ok(IndicatorFrame::from_rows(rows))
}
