//! [`SerialConnection`](elmlink_application::SerialConnection) implementations.
//!
//! - [`TcpConnection`]: WiFi adapters exposing the serial line over TCP
//! - [`SimulatedAdapter`]: in-process adapter for demos and tests

mod simulator;
mod tcp;

pub use simulator::SimulatedAdapter;
pub use tcp::{DEFAULT_ADDRESS, TcpConnection};
