use tracing::debug;

use crate::models::{Horizon, HorizonOutcome, IndicatorFrame, Projection};
use crate::projection::ProjectionParams;

/// Flat-band projection around the latest observed price.
///
/// Both horizons apply the same `±band` move; they differ only in how much
/// history is required before a value is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionEngine {
    params: ProjectionParams,
}

impl ProjectionEngine {
    pub fn new(params: ProjectionParams) -> Self {
        Self { params }
    }

    /// `None` for an empty frame. A horizon whose window is longer than the
    /// available history is reported as `None` on its own.
    pub fn project(&self, frame: &IndicatorFrame) -> Option<Projection> {
        let latest_price = frame.latest_price()?;

        let outcome = |horizon: Horizon| -> Option<HorizonOutcome> {
            let window = self.params.window(horizon);
            if frame.len() < window {
                debug!(
                    horizon = %horizon,
                    available = frame.len(),
                    window,
                    "insufficient history for horizon"
                );
                return None;
            }
            Some(self.outcome(latest_price))
        };

        Some(Projection {
            latest_price,
            eight_hours: outcome(Horizon::EightHours),
            seven_days: outcome(Horizon::SevenDays),
        })
    }

    fn outcome(&self, latest_price: f64) -> HorizonOutcome {
        let projected_up = latest_price * (1.0 + self.params.band());
        let projected_down = latest_price * (1.0 - self.params.band());
        HorizonOutcome {
            projected_up,
            projected_down,
            delta_pct: percent_change(latest_price, projected_up),
        }
    }
}

/// `(to - from) / from * 100`, or `None` when `from` is zero.
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    Some((to - from) / from * 100.0)
}
