//! Periodic crypto market-signal generator.
//!
//! Price history flows one way per asset:
//! `PriceSeries` -> [`indicators::compute_indicators`] ->
//! [`projection::ProjectionEngine`] -> [`signals`] -> message text ->
//! [`services::NotificationSink`].

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod projection;
pub mod services;
pub mod signals;
pub mod universe;
