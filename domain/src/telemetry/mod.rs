//! Vehicle telemetry on top of the command link.
//!
//! - [`gauge::Gauge`]: the polled quantities and their request commands
//! - [`parsing::parse_raw_value`]: extraction of the hex payload from a reply
//! - [`sample::TelemetrySample`]: one converted reading
//! - [`init::INITIALIZE_COMMANDS`]: adapter setup sequence

pub mod gauge;
pub mod init;
pub mod parsing;
pub mod sample;
