//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod command_link;
pub mod exchange_logger;
pub mod serial_connection;
pub mod telemetry_sink;
