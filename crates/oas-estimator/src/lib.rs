//! Intake engine for the old age benefits estimator.

pub mod config;
pub mod error;
pub mod intake;
pub mod telemetry;
