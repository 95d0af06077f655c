//! Telemetry sample value object

use super::gauge::Gauge;
use super::parsing::parse_raw_value;
use crate::core::error::DomainError;
use serde::Serialize;

/// One converted gauge reading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TelemetrySample {
    pub gauge: Gauge,
    /// Raw integer payload as reported by the ECU
    pub raw: u32,
    /// Value in the gauge's unit
    pub value: f64,
}

impl TelemetrySample {
    /// Build a sample from the adapter's reply to `gauge.command()`
    pub fn from_response(gauge: Gauge, response: &str) -> Result<Self, DomainError> {
        let raw = parse_raw_value(response)?;
        Ok(Self {
            gauge,
            raw,
            value: gauge.convert(raw),
        })
    }
}
