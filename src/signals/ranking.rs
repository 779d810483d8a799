//! Best-candidate selection across an asset universe.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Horizon, Projection, RankingScore};
use crate::signals::scoring::ranking_score;
use crate::universe::AssetUniverse;

/// Which asset is named as "best" when the 8h and 7d winners differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributionPolicy {
    /// Track each horizon's winner separately; the 8h winner is the
    /// headline, falling back to the 7d winner.
    #[default]
    PerHorizon,
    /// Whichever asset most recently raised either maximum, in iteration order.
    LastImproved,
}

impl FromStr for AttributionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-horizon" | "per_horizon" => Ok(AttributionPolicy::PerHorizon),
            "last-improved" | "last_improved" => Ok(AttributionPolicy::LastImproved),
            other => Err(format!("unknown attribution policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonWinner {
    pub asset: String,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub best_asset: String,
    pub best_8h_pct: Option<f64>,
    pub best_7d_pct: Option<f64>,
    pub best_8h: Option<HorizonWinner>,
    pub best_7d: Option<HorizonWinner>,
}

impl Selection {
    pub fn winner(&self, horizon: Horizon) -> Option<&HorizonWinner> {
        match horizon {
            Horizon::EightHours => self.best_8h.as_ref(),
            Horizon::SevenDays => self.best_7d.as_ref(),
        }
    }
}

/// Running maxima over a stream of per-asset scores.
///
/// Comparisons are strictly greater-than, so on ties the earlier asset keeps
/// its place. Scores start at negative infinity, which an unranked asset can
/// never beat.
#[derive(Debug, Clone)]
pub struct RankingAccumulator {
    policy: AttributionPolicy,
    best_8h: Option<HorizonWinner>,
    best_7d: Option<HorizonWinner>,
    last_improved: Option<String>,
}

impl RankingAccumulator {
    pub fn new(policy: AttributionPolicy) -> Self {
        Self {
            policy,
            best_8h: None,
            best_7d: None,
            last_improved: None,
        }
    }

    pub fn observe(&mut self, asset: &str, score: RankingScore) {
        for horizon in Horizon::ALL {
            let value = score.get(horizon);
            let slot = match horizon {
                Horizon::EightHours => &mut self.best_8h,
                Horizon::SevenDays => &mut self.best_7d,
            };
            let current = slot.as_ref().map_or(f64::NEG_INFINITY, |w| w.pct);
            if value > current {
                *slot = Some(HorizonWinner {
                    asset: asset.to_string(),
                    pct: value,
                });
                self.last_improved = Some(asset.to_string());
            }
        }
    }

    pub fn finish(self) -> Option<Selection> {
        let best_asset = match self.policy {
            AttributionPolicy::PerHorizon => self
                .best_8h
                .as_ref()
                .or(self.best_7d.as_ref())
                .map(|w| w.asset.clone()),
            AttributionPolicy::LastImproved => self.last_improved,
        }?;

        Some(Selection {
            best_asset,
            best_8h_pct: self.best_8h.as_ref().map(|w| w.pct),
            best_7d_pct: self.best_7d.as_ref().map(|w| w.pct),
            best_8h: self.best_8h,
            best_7d: self.best_7d,
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RankingSelector {
    policy: AttributionPolicy,
}

impl RankingSelector {
    pub fn new(policy: AttributionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AttributionPolicy {
        self.policy
    }

    pub fn accumulator(&self) -> RankingAccumulator {
        RankingAccumulator::new(self.policy)
    }

    /// Scan the universe's candidates in order. Assets missing from
    /// `projections` are treated as unranked.
    pub fn select_best(
        &self,
        universe: &AssetUniverse,
        projections: &HashMap<String, Projection>,
    ) -> Option<Selection> {
        let mut acc = self.accumulator();
        for asset in universe.candidates() {
            acc.observe(asset, ranking_score(projections.get(asset)));
        }
        acc.finish()
    }
}
