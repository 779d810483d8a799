use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Forward-looking window a projection is reported for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "8h")]
    EightHours,
    #[serde(rename = "7d")]
    SevenDays,
}

impl Horizon {
    pub const ALL: [Horizon; 2] = [Horizon::EightHours, Horizon::SevenDays];

    pub fn duration(&self) -> Duration {
        match self {
            Horizon::EightHours => Duration::hours(8),
            Horizon::SevenDays => Duration::days(7),
        }
    }

    /// Human wording used in message text.
    pub fn describe(&self) -> &'static str {
        match self {
            Horizon::EightHours => "8 hours",
            Horizon::SevenDays => "7 days",
        }
    }

    pub fn short(&self) -> &'static str {
        match self {
            Horizon::EightHours => "8h",
            Horizon::SevenDays => "7d",
        }
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizonOutcome {
    pub projected_up: f64,
    pub projected_down: f64,
    /// `None` when the latest price is zero.
    pub delta_pct: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub latest_price: f64,
    /// `None` when the series is shorter than the horizon window.
    pub eight_hours: Option<HorizonOutcome>,
    pub seven_days: Option<HorizonOutcome>,
}

impl Projection {
    pub fn horizon(&self, horizon: Horizon) -> Option<&HorizonOutcome> {
        match horizon {
            Horizon::EightHours => self.eight_hours.as_ref(),
            Horizon::SevenDays => self.seven_days.as_ref(),
        }
    }
}
