//! Shared builders for unit tests
#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use coincast::models::{HorizonOutcome, PriceSeries, Projection};

/// Five-minute series starting 2024-01-01.
pub fn series(prices: &[f64]) -> PriceSeries {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    PriceSeries::from_prices(start, Duration::minutes(5), prices)
}

pub fn flat(len: usize, price: f64) -> PriceSeries {
    series(&vec![price; len])
}

/// `start, start + step, ...` with `len` points.
pub fn ramp(len: usize, start: f64, step: f64) -> Vec<f64> {
    (0..len).map(|i| start + step * i as f64).collect()
}

/// Projection at price 100 with the given 8h / 7d upside percentages.
pub fn projection_with(pct_8h: Option<f64>, pct_7d: Option<f64>) -> Projection {
    let outcome = |pct: f64| HorizonOutcome {
        projected_up: 100.0 + pct,
        projected_down: 90.0,
        delta_pct: Some(pct),
    };
    Projection {
        latest_price: 100.0,
        eight_hours: pct_8h.map(outcome),
        seven_days: pct_7d.map(outcome),
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
