//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`TelemetryConfig`]: polling cadence, gauge selection, per-command timeout

pub mod telemetry_config;

pub use telemetry_config::TelemetryConfig;
