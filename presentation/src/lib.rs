//! Presentation layer for elmlink
//!
//! This crate contains the CLI definition, console formatting of replies
//! and readings, and the telemetry reporter.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::TelemetryReporter;
