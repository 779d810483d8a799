//! Turning projections into alerts or ranking scores.

pub mod decision;
pub mod message;
pub mod ranking;
pub mod scoring;

pub use decision::*;
pub use message::*;
pub use ranking::*;
pub use scoring::*;
