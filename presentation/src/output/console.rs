//! Console output formatter for replies and readings

use crate::cli::commands::OutputFormat;
use colored::Colorize;
use elmlink_application::PollSummary;
use elmlink_domain::{Gauge, TelemetrySample, preview};

/// Formats link traffic and telemetry for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One command and the adapter's reply
    pub fn format_reply(command: &str, reply: &str, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => format!(
                "{} {}",
                format!("{:>12}", command).cyan().bold(),
                Self::reply_lines(reply)
            ),
            OutputFormat::Json => serde_json::json!({
                "command": command,
                "reply": reply.trim(),
            })
            .to_string(),
        }
    }

    /// A command that resolved with an error
    pub fn format_command_error(command: &str, error: &str, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => format!(
                "{} {} {}",
                format!("{:>12}", command).cyan().bold(),
                "x".red(),
                error.red()
            ),
            OutputFormat::Json => serde_json::json!({
                "command": command,
                "error": error,
            })
            .to_string(),
        }
    }

    pub fn format_sample(sample: &TelemetrySample, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => format!(
                "{} {} {}",
                format!("{:>6}", sample.gauge.as_str()).yellow().bold(),
                Self::value(sample.gauge, sample.value).bold(),
                sample.gauge.unit().dimmed()
            ),
            OutputFormat::Json => serde_json::to_string(sample).unwrap_or_else(|_| "{}".to_string()),
        }
    }

    pub fn format_gauge_error(gauge: Gauge, error: &str, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => format!(
                "{} {} {}",
                format!("{:>6}", gauge.as_str()).yellow().bold(),
                "x".red(),
                error.dimmed()
            ),
            OutputFormat::Json => serde_json::json!({
                "gauge": gauge,
                "error": error,
            })
            .to_string(),
        }
    }

    pub fn format_status(message: &str) -> String {
        format!("{} {}", "->".cyan(), message)
    }

    /// Closing line after polling stopped
    pub fn format_summary(summary: &PollSummary) -> String {
        let errors = if summary.errors == 0 {
            "0 errors".green()
        } else {
            format!("{} errors", summary.errors).yellow()
        };
        format!(
            "{} {} rounds, {} readings, {}",
            "Polling stopped:".cyan().bold(),
            summary.rounds,
            summary.samples,
            errors
        )
    }

    /// Reply text on one line with adapter line endings made visible
    fn reply_lines(reply: &str) -> String {
        let trimmed = reply.trim();
        if trimmed.is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            preview(trimmed, 120)
        }
    }

    fn value(gauge: Gauge, value: f64) -> String {
        match gauge {
            Gauge::Boost => format!("{:>7.2}", value),
            Gauge::Speed | Gauge::EngineRpm => format!("{:>7.0}", value),
        }
    }
}
