//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod projection;
pub mod series;
pub mod signal;

pub use indicators::{IndicatorFrame, IndicatorRow};
pub use projection::{Horizon, HorizonOutcome, Projection};
pub use series::{PricePoint, PriceSeries};
pub use signal::{RankingScore, Recommendation, Signal, SignalDirection, SignalMode};
