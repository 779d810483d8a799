//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::indicators::IndicatorError;

/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Row 0 has no prior price and counts as zero gain and zero loss. Averages
/// are trailing arithmetic means over `period` rows, so the first defined row
/// is `period - 1`. A window with no losses reports 100.
pub fn rsi_series(prices: &[f64], period: usize) -> Result<Vec<Option<f64>>, IndicatorError> {
    IndicatorError::check_window("rsi", period)?;

    let mut out = vec![None; prices.len()];
    if prices.len() < period {
        return Ok(out);
    }

    let deltas: Vec<f64> = std::iter::once(0.0)
        .chain(prices.windows(2).map(|w| w[1] - w[0]))
        .collect();
    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    for row in period - 1..prices.len() {
        let window = row + 1 - period..row + 1;
        let avg_gain = math::mean(&gains[window.clone()]);
        let avg_loss = math::mean(&losses[window]);
        out[row] = Some(rsi_value(avg_gain, avg_loss));
    }
    Ok(out)
}

pub fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}
