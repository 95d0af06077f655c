//! Telemetry reporting to the terminal

use crate::cli::commands::OutputFormat;
use crate::output::console::ConsoleFormatter;
use elmlink_application::TelemetrySink;
use elmlink_domain::{Gauge, TelemetrySample};

/// Prints readings to stdout and status lines to stderr
pub struct TelemetryReporter {
    format: OutputFormat,
    quiet: bool,
}

impl TelemetryReporter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            quiet: false,
        }
    }

    /// Suppress status lines; readings and errors are still printed
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl TelemetrySink for TelemetryReporter {
    fn on_sample(&self, sample: &TelemetrySample) {
        println!("{}", ConsoleFormatter::format_sample(sample, self.format));
    }

    fn on_gauge_error(&self, gauge: Gauge, error: &str) {
        println!(
            "{}",
            ConsoleFormatter::format_gauge_error(gauge, error, self.format)
        );
    }

    fn on_status(&self, message: &str) {
        // Status goes to stderr so JSON output stays machine-readable.
        if !self.quiet {
            eprintln!("{}", ConsoleFormatter::format_status(message));
        }
    }
}
