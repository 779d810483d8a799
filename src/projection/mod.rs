//! Near-term and medium-term price projection from an indicator frame.

pub mod engine;
pub mod params;

pub use engine::ProjectionEngine;
pub use params::{ProjectionError, ProjectionParams};
