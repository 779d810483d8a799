//! Message text sent to the notification sink.

use crate::models::{Horizon, SignalDirection};
use crate::signals::ranking::{AttributionPolicy, Selection};

/// Uppercase the first character and lowercase the rest: `bitcoin` -> `Bitcoin`.
pub fn display_name(asset: &str) -> String {
    let mut chars = asset.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn render_alert(
    asset: &str,
    horizon: Horizon,
    direction: SignalDirection,
    latest_price: f64,
    target_price: f64,
    percentage: f64,
) -> String {
    let name = display_name(asset);
    let period = horizon.describe();
    match direction {
        SignalDirection::Buy => format!(
            "Buy {name} now! The current price is ${latest_price:.2}. \
             The projected price could increase to around ${target_price:.2} over the next {period}. \
             This represents an estimated profit of {percentage:.2}%. \
             You can consider selling this coin after {period} to potentially realize this profit."
        ),
        SignalDirection::Sell => format!(
            "Sell {name} now! The current price is ${latest_price:.2}. \
             The indicators suggest that the price might decrease to around ${target_price:.2} over the next {period}. \
             This represents a potential loss of {percentage:.2}%. \
             You might want to cut losses or take profits if the price starts to drop further."
        ),
    }
}

fn pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}%"),
        None => "n/a".to_string(),
    }
}

pub fn render_best_candidate(selection: &Selection, policy: AttributionPolicy) -> String {
    let headline = format!(
        "The best potential high return coin is {}.",
        display_name(&selection.best_asset)
    );
    match policy {
        AttributionPolicy::LastImproved => format!(
            "{headline}\nProjected profit in the next 8 hours: {}\nProjected profit in the next 7 days: {}",
            pct(selection.best_8h_pct),
            pct(selection.best_7d_pct),
        ),
        AttributionPolicy::PerHorizon => {
            let line = |horizon: Horizon| -> String {
                let winner = selection.winner(horizon);
                let suffix = winner
                    .map(|w| format!(" ({})", display_name(&w.asset)))
                    .unwrap_or_default();
                format!(
                    "Projected profit in the next {}: {}{}",
                    horizon.describe(),
                    pct(winner.map(|w| w.pct)),
                    suffix
                )
            };
            format!(
                "{headline}\n{}\n{}",
                line(Horizon::EightHours),
                line(Horizon::SevenDays)
            )
        }
    }
}
