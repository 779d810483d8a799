//! Raw price history for a single asset.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Ordered (timestamp, price) history.
///
/// Construction drops points that would break the ordering invariant
/// (non-increasing timestamps) and points whose price is negative or not
/// finite, so every `PriceSeries` in the crate can be consumed without
/// further validation. An empty series means "no data for this asset".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: impl IntoIterator<Item = PricePoint>) -> Self {
        let mut kept: Vec<PricePoint> = Vec::new();
        for point in points {
            if !point.price.is_finite() || point.price < 0.0 {
                continue;
            }
            if let Some(last) = kept.last() {
                if point.timestamp <= last.timestamp {
                    continue;
                }
            }
            kept.push(point);
        }
        Self { points: kept }
    }

    /// Build from `(unix millis, price)` rows as returned by chart endpoints.
    pub fn from_millis(rows: impl IntoIterator<Item = (i64, f64)>) -> Self {
        Self::from_points(rows.into_iter().filter_map(|(millis, price)| {
            DateTime::from_timestamp_millis(millis).map(|ts| PricePoint::new(ts, price))
        }))
    }

    /// Evenly spaced series starting at `start`.
    pub fn from_prices(start: DateTime<Utc>, interval: Duration, prices: &[f64]) -> Self {
        Self::from_points(
            prices
                .iter()
                .enumerate()
                .map(|(i, &price)| PricePoint::new(start + interval * i as i32, price)),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}
