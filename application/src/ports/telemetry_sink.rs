//! Telemetry sink port
//!
//! Receives converted readings and status lines from the telemetry use
//! cases. Implementations live in the presentation layer.

use elmlink_domain::{Gauge, TelemetrySample};

/// Consumer of telemetry values and log lines
pub trait TelemetrySink: Send + Sync {
    /// Called for every successfully converted reading
    fn on_sample(&self, sample: &TelemetrySample);

    /// Called when a gauge request failed without stopping the poller
    fn on_gauge_error(&self, _gauge: Gauge, _error: &str) {}

    /// Called with human-readable progress lines
    fn on_status(&self, _message: &str) {}
}

/// No-op sink for when readings are not displayed
pub struct NoTelemetrySink;

impl TelemetrySink for NoTelemetrySink {
    fn on_sample(&self, _sample: &TelemetrySample) {}
}
