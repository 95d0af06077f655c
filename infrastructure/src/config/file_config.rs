//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Durations are plain millisecond counts; conversion into application
//! types happens after validation.

use crate::transport::DEFAULT_ADDRESS;
use elmlink_application::TelemetryConfig;
use elmlink_domain::Gauge;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("link.address cannot be empty")]
    EmptyAddress,

    #[error("link.{0} cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("telemetry.poll_interval_ms cannot be 0")]
    InvalidPollInterval,

    #[error("telemetry.gauges: unknown gauge '{0}'")]
    UnknownGauge(String),
}

/// Raw link configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLinkConfig {
    /// `host:port` of a WiFi adapter
    pub address: String,
    pub connect_timeout_ms: u64,
    /// How long a caller waits for a reply
    pub command_timeout_ms: Option<u64>,
}

impl Default for FileLinkConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            connect_timeout_ms: 5_000,
            command_timeout_ms: Some(2_000),
        }
    }
}

/// Raw telemetry configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTelemetryConfig {
    pub poll_interval_ms: u64,
    /// Gauge names (`speed`, `rpm`, `boost`)
    pub gauges: Vec<String>,
    /// Send the adapter setup sequence before polling
    pub initialize: bool,
}

impl Default for FileTelemetryConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1_000,
            gauges: Gauge::ALL.iter().map(|g| g.as_str().to_string()).collect(),
            initialize: true,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of every exchange
    pub exchange_log: Option<String>,
    /// Diagnostic log file (in addition to stderr)
    pub log_file: Option<String>,
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub link: FileLinkConfig,
    pub telemetry: FileTelemetryConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.link.address.trim().is_empty() {
            return Err(ConfigValidationError::EmptyAddress);
        }
        if self.link.connect_timeout_ms == 0 {
            return Err(ConfigValidationError::InvalidTimeout("connect_timeout_ms"));
        }
        if let Some(0) = self.link.command_timeout_ms {
            return Err(ConfigValidationError::InvalidTimeout("command_timeout_ms"));
        }
        if self.telemetry.poll_interval_ms == 0 {
            return Err(ConfigValidationError::InvalidPollInterval);
        }
        self.gauges()?;
        Ok(())
    }

    /// Parse the configured gauge names, preserving order and dropping repeats
    pub fn gauges(&self) -> Result<Vec<Gauge>, ConfigValidationError> {
        let mut gauges = Vec::with_capacity(self.telemetry.gauges.len());
        for name in &self.telemetry.gauges {
            let gauge: Gauge = name
                .parse()
                .map_err(|_| ConfigValidationError::UnknownGauge(name.clone()))?;
            if !gauges.contains(&gauge) {
                gauges.push(gauge);
            }
        }
        Ok(gauges)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.link.connect_timeout_ms)
    }

    /// Caller-side bound on waiting for a reply
    pub fn command_timeout(&self) -> Option<Duration> {
        self.link.command_timeout_ms.map(Duration::from_millis)
    }

    /// Build the polling configuration
    pub fn telemetry_config(&self) -> Result<TelemetryConfig, ConfigValidationError> {
        let mut config = TelemetryConfig::default()
            .with_poll_interval(Duration::from_millis(self.telemetry.poll_interval_ms))
            .with_gauges(self.gauges()?)
            .with_command_timeout(self.command_timeout());
        if !self.telemetry.initialize {
            config = config.without_initialize();
        }
        Ok(config)
    }
}
