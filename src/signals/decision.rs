//! Per-asset alert decisions.

use crate::models::{
    Horizon, HorizonOutcome, Projection, Recommendation, Signal, SignalDirection, SignalMode,
};
use crate::projection::engine::percent_change;
use crate::signals::message::render_alert;
use crate::signals::scoring::ranking_score;

pub struct SignalDecisionEngine;

impl SignalDecisionEngine {
    pub fn decide(mode: SignalMode, asset: &str, projection: &Projection) -> Signal {
        match mode {
            SignalMode::Alert => Signal::Alert(Self::alerts(asset, projection)),
            SignalMode::Ranking => Signal::Ranking(ranking_score(Some(projection))),
        }
    }

    /// Evaluate each horizon independently; zero, one or two recommendations.
    pub fn alerts(asset: &str, projection: &Projection) -> Vec<Recommendation> {
        Horizon::ALL
            .into_iter()
            .filter_map(|horizon| {
                let outcome = projection.horizon(horizon)?;
                evaluate_horizon(asset, horizon, projection.latest_price, outcome)
            })
            .collect()
    }
}

/// Buy when the upside is a positive move above the latest price, otherwise
/// sell when the downside is below it.
pub fn evaluate_horizon(
    asset: &str,
    horizon: Horizon,
    latest_price: f64,
    outcome: &HorizonOutcome,
) -> Option<Recommendation> {
    let upside = outcome.delta_pct.filter(|pct| *pct > 0.0);
    if let Some(pct) = upside.filter(|_| outcome.projected_up > latest_price) {
        return Some(recommendation(
            asset,
            horizon,
            SignalDirection::Buy,
            latest_price,
            outcome.projected_up,
            pct,
        ));
    }

    if outcome.projected_down < latest_price {
        let loss = percent_change(latest_price, outcome.projected_down).map(|pct| -pct)?;
        return Some(recommendation(
            asset,
            horizon,
            SignalDirection::Sell,
            latest_price,
            outcome.projected_down,
            loss,
        ));
    }

    None
}

fn recommendation(
    asset: &str,
    horizon: Horizon,
    direction: SignalDirection,
    latest_price: f64,
    target_price: f64,
    percentage: f64,
) -> Recommendation {
    Recommendation {
        asset: asset.to_string(),
        horizon,
        direction,
        latest_price,
        target_price,
        percentage,
        message: render_alert(
            asset,
            horizon,
            direction,
            latest_price,
            target_price,
            percentage,
        ),
    }
}
