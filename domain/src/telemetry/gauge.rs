//! Gauge value object representing a polled vehicle quantity

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A vehicle quantity that can be polled through the adapter (Value Object)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gauge {
    Speed,
    EngineRpm,
    Boost,
}

impl Gauge {
    /// All gauges, in display order
    pub const ALL: [Gauge; 3] = [Gauge::Speed, Gauge::EngineRpm, Gauge::Boost];

    /// Get the string identifier for this gauge
    pub fn as_str(&self) -> &'static str {
        match self {
            Gauge::Speed => "speed",
            Gauge::EngineRpm => "rpm",
            Gauge::Boost => "boost",
        }
    }

    /// Request command sent to the adapter (KWP2000 local identifier read)
    pub fn command(&self) -> &'static str {
        match self {
            Gauge::Speed => "21 0D 01",
            Gauge::EngineRpm => "21 0C 01",
            Gauge::Boost => "21 0B 01",
        }
    }

    /// Display unit of the converted value
    pub fn unit(&self) -> &'static str {
        match self {
            Gauge::Speed => "km/h",
            Gauge::EngineRpm => "rpm",
            Gauge::Boost => "bar",
        }
    }

    /// Convert the raw integer payload into the gauge's unit
    pub fn convert(&self, raw: u32) -> f64 {
        let raw = f64::from(raw);
        match self {
            Gauge::Speed => raw,
            Gauge::EngineRpm => raw * 0.25,
            Gauge::Boost => raw / 100.0,
        }
    }
}

impl std::fmt::Display for Gauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gauge {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "speed" => Ok(Gauge::Speed),
            "rpm" | "engine-rpm" => Ok(Gauge::EngineRpm),
            "boost" => Ok(Gauge::Boost),
            _ => Err(DomainError::UnknownGauge(s.to_string())),
        }
    }
}

impl Serialize for Gauge {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Gauge {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_roundtrip() {
        for gauge in Gauge::ALL {
            let parsed: Gauge = gauge.to_string().parse().unwrap();
            assert_eq!(gauge, parsed);
        }
    }

    #[test]
    fn test_unknown_gauge() {
        let err = "oil-temp".parse::<Gauge>().unwrap_err();
        assert_eq!(err, DomainError::UnknownGauge("oil-temp".to_string()));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Gauge::Speed.convert(50), 50.0);
        assert_eq!(Gauge::EngineRpm.convert(0x1F40), 2000.0);
        assert_eq!(Gauge::Boost.convert(150), 1.5);
    }

    #[test]
    fn test_deserialize_from_config_string() {
        let gauges: Vec<Gauge> = serde_json::from_str(r#"["speed", "RPM"]"#).unwrap();
        assert_eq!(gauges, vec![Gauge::Speed, Gauge::EngineRpm]);
    }
}
