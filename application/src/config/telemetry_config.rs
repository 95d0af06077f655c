//! Telemetry parameters controlling the polling loop.
//!
//! [`TelemetryConfig`] groups the static parameters that control
//! [`PollTelemetryUseCase`](crate::use_cases::poll_telemetry::PollTelemetryUseCase)
//! and whether [`InitializeAdapterUseCase`](crate::use_cases::initialize_adapter::InitializeAdapterUseCase)
//! runs before it.

use elmlink_domain::Gauge;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Polling loop control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Time between two polling rounds.
    pub poll_interval: Duration,
    /// Gauges polled each round, in order.
    pub gauges: Vec<Gauge>,
    /// Caller-side timeout around each gauge request.
    ///
    /// A timed-out request stays queued on the link; only the wait is
    /// abandoned.
    pub command_timeout: Option<Duration>,
    /// Send the adapter initialization sequence before polling.
    pub initialize: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            gauges: Gauge::ALL.to_vec(),
            command_timeout: Some(Duration::from_secs(2)),
            initialize: true,
        }
    }
}

impl TelemetryConfig {
    // ==================== Builder Methods ====================

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_gauges(mut self, gauges: Vec<Gauge>) -> Self {
        self.gauges = gauges;
        self
    }

    pub fn with_command_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn without_initialize(mut self) -> Self {
        self.initialize = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_poll_every_gauge() {
        let config = TelemetryConfig::default();
        assert_eq!(config.gauges, Gauge::ALL.to_vec());
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert!(config.initialize);
    }

    #[test]
    fn test_builder_chain() {
        let config = TelemetryConfig::default()
            .with_poll_interval(Duration::from_millis(250))
            .with_gauges(vec![Gauge::EngineRpm])
            .with_command_timeout(None)
            .without_initialize();
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.gauges, vec![Gauge::EngineRpm]);
        assert!(config.command_timeout.is_none());
        assert!(!config.initialize);
    }
}
