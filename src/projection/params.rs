use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Horizon;

/// Window sizes for the reference 5-minute feed: 48 points for 8 hours and
/// 336 points for 7 days.
pub const DEFAULT_EIGHT_HOURS_WINDOW: usize = 48;
pub const DEFAULT_SEVEN_DAYS_WINDOW: usize = 336;
pub const DEFAULT_BAND: f64 = 0.10;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("window for {horizon} must be at least 1 point")]
    InvalidWindow { horizon: Horizon },
    #[error("sample interval must be non-zero")]
    InvalidCadence,
    #[error("band must be in [0, 1), got {0}")]
    InvalidBand(f64),
}

/// Band width and the number of samples that make up each horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    band: f64,
    eight_hours_window: usize,
    seven_days_window: usize,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            band: DEFAULT_BAND,
            eight_hours_window: DEFAULT_EIGHT_HOURS_WINDOW,
            seven_days_window: DEFAULT_SEVEN_DAYS_WINDOW,
        }
    }
}

impl ProjectionParams {
    pub fn new(
        band: f64,
        eight_hours_window: usize,
        seven_days_window: usize,
    ) -> Result<Self, ProjectionError> {
        if !(0.0..1.0).contains(&band) {
            return Err(ProjectionError::InvalidBand(band));
        }
        if eight_hours_window == 0 {
            return Err(ProjectionError::InvalidWindow {
                horizon: Horizon::EightHours,
            });
        }
        if seven_days_window == 0 {
            return Err(ProjectionError::InvalidWindow {
                horizon: Horizon::SevenDays,
            });
        }
        Ok(Self {
            band,
            eight_hours_window,
            seven_days_window,
        })
    }

    /// Derive window sizes from the data source's sampling interval: each
    /// horizon spans `ceil(horizon / interval)` samples.
    pub fn for_cadence(sample_interval: Duration) -> Result<Self, ProjectionError> {
        if sample_interval.is_zero() {
            return Err(ProjectionError::InvalidCadence);
        }
        let points = |horizon: Horizon| -> usize {
            let horizon_secs = horizon.duration().num_seconds() as u128;
            let interval_ms = sample_interval.as_millis();
            (horizon_secs * 1000).div_ceil(interval_ms) as usize
        };
        Self::new(
            DEFAULT_BAND,
            points(Horizon::EightHours),
            points(Horizon::SevenDays),
        )
    }

    pub fn with_band(self, band: f64) -> Result<Self, ProjectionError> {
        Self::new(band, self.eight_hours_window, self.seven_days_window)
    }

    pub fn band(&self) -> f64 {
        self.band
    }

    pub fn window(&self, horizon: Horizon) -> usize {
        match horizon {
            Horizon::EightHours => self.eight_hours_window,
            Horizon::SevenDays => self.seven_days_window,
        }
    }
}
