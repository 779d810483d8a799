//! Ranking-mode scores

use crate::models::{Horizon, Projection, RankingScore};

/// Reduce a projection to per-horizon scores.
///
/// A missing projection, a missing horizon or an undefined percentage all
/// score negative infinity so the asset can never win a ranking.
pub fn ranking_score(projection: Option<&Projection>) -> RankingScore {
    let Some(projection) = projection else {
        return RankingScore::UNRANKED;
    };
    let score = |horizon: Horizon| -> f64 {
        projection
            .horizon(horizon)
            .and_then(|outcome| outcome.delta_pct)
            .unwrap_or(f64::NEG_INFINITY)
    };
    RankingScore {
        eight_hours: score(Horizon::EightHours),
        seven_days: score(Horizon::SevenDays),
    }
}
