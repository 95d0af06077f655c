//! Use cases
//!
//! - [`initialize_adapter`]: adapter setup sequence after connecting
//! - [`poll_telemetry`]: periodic gauge polling
//! - [`send_commands`]: one-shot commands from the command line

pub mod initialize_adapter;
pub mod poll_telemetry;
pub mod send_commands;

#[cfg(test)]
pub(crate) mod test_support;
