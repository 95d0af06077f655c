//! Domain layer for elmlink
//!
//! This crate contains the value objects of the adapter protocol and of the
//! telemetry built on it. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Command / Frame
//!
//! The adapter link carries exactly one exchange at a time:
//!
//! - **Command**: text sent to the adapter, suffixed with a carriage return
//! - **Frame**: text received until the next `>` prompt
//!
//! ## Gauges
//!
//! Speed, engine RPM and boost are polled with fixed request commands and
//! converted from the hex payload of the reply.

pub mod core;
pub mod protocol;
pub mod telemetry;
pub mod util;

// Re-export commonly used types
pub use core::error::DomainError;
pub use protocol::{COMMAND_SUFFIX, TERMINATOR, command::CommandText, frame::Frame};
pub use telemetry::{
    gauge::Gauge, init::INITIALIZE_COMMANDS, parsing::parse_raw_value, sample::TelemetrySample,
};
pub use util::preview;
