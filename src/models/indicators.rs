use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamp of the indicator frame. `None` marks a value the rolling
/// window could not yet produce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub sma_20: Option<f64>,
    pub ema_20: Option<f64>,
    pub ema_50: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub bollinger_middle: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub rsi: Option<f64>,
}

/// Price series augmented with derived indicator columns, row-aligned by
/// timestamp. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFrame {
    rows: Vec<IndicatorRow>,
}

impl IndicatorFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_rows(rows: Vec<IndicatorRow>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn latest(&self) -> Option<&IndicatorRow> {
        self.rows.last()
    }

    pub fn latest_price(&self) -> Option<f64> {
        self.rows.last().map(|row| row.price)
    }

    /// Extract a single column, e.g. `frame.column(|r| r.rsi)`.
    pub fn column<F>(&self, pick: F) -> Vec<Option<f64>>
    where
        F: Fn(&IndicatorRow) -> Option<f64>,
    {
        self.rows.iter().map(pick).collect()
    }
}
