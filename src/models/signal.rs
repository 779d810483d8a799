use serde::{Deserialize, Serialize};

use super::projection::Horizon;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalDirection {
    Buy,
    Sell,
}

impl SignalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalDirection::Buy => "buy",
            SignalDirection::Sell => "sell",
        }
    }
}

/// How a projection is turned into a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalMode {
    /// One buy/sell message per asset and horizon.
    Alert,
    /// Scalar scores for cross-asset comparison.
    Ranking,
}

/// Directional recommendation for one asset and one horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub asset: String,
    pub horizon: Horizon,
    pub direction: SignalDirection,
    pub latest_price: f64,
    pub target_price: f64,
    /// Profit percentage for buys, loss percentage for sells. Always positive.
    pub percentage: f64,
    pub message: String,
}

/// Per-horizon ranking scores. Missing projections rank as negative infinity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingScore {
    pub eight_hours: f64,
    pub seven_days: f64,
}

impl RankingScore {
    pub const UNRANKED: RankingScore = RankingScore {
        eight_hours: f64::NEG_INFINITY,
        seven_days: f64::NEG_INFINITY,
    };

    pub fn get(&self, horizon: Horizon) -> f64 {
        match horizon {
            Horizon::EightHours => self.eight_hours,
            Horizon::SevenDays => self.seven_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    Ranking(RankingScore),
    Alert(Vec<Recommendation>),
}
