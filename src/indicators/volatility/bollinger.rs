//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::IndicatorError;

#[derive(Debug, Clone, PartialEq)]
pub struct BollingerColumns {
    pub middle: Vec<Option<f64>>,
    pub upper: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * sample standard deviation)
/// Lower Band = Middle - (std_dev * sample standard deviation)
pub fn bollinger_series(
    prices: &[f64],
    period: usize,
    std_dev: f64,
) -> Result<BollingerColumns, IndicatorError> {
    let middle = math::rolling_mean(prices, period)?;
    let deviation = math::rolling_sample_std(prices, period)?;

    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(deviation.iter())
            .map(|(m, s)| match (m, s) {
                (Some(m), Some(s)) => Some(m + sign * std_dev * s),
                _ => None,
            })
            .collect()
    };
    let upper = band(1.0);
    let lower = band(-1.0);

    Ok(BollingerColumns {
        middle,
        upper,
        lower,
    })
}
