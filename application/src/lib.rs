//! Application layer for elmlink
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::TelemetryConfig;
pub use ports::{
    command_link::{CommandLink, LinkError},
    exchange_logger::{ExchangeEvent, ExchangeLogger, NoExchangeLogger},
    serial_connection::{ByteStream, SerialConnection, TransportError},
    telemetry_sink::{NoTelemetrySink, TelemetrySink},
};
pub use use_cases::initialize_adapter::{InitializeAdapterUseCase, InitializeError};
pub use use_cases::poll_telemetry::{PollSummary, PollTelemetryError, PollTelemetryUseCase};
pub use use_cases::send_commands::{CommandOutcome, SendCommandsUseCase, SendSummary};
