//! CLI command definitions

use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for replies and readings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// CLI arguments for elmlink
#[derive(Parser, Debug)]
#[command(name = "elmlink")]
#[command(author, version, about = "Command/reply link to ELM327-style OBD2 adapters")]
#[command(long_about = r#"
elmlink talks to an ELM327-compatible OBD2 adapter over a single channel,
sending one command at a time and matching every reply to its command.

Without commands it initializes the adapter and polls speed, engine RPM
and boost until interrupted. With commands it sends them in order and
prints each reply.

Configuration files are loaded from (in priority order):
1. ELMLINK_* environment variables
2. --config <path>     Explicit config file
3. ./elmlink.toml      Project-level config
4. ~/.config/elmlink/config.toml   Global config

Example:
  elmlink --simulate
  elmlink --address 192.168.0.10:35000 "AT RV" "ATI"
  elmlink --simulate --interval 250 --no-init -vv
"#)]
#[command(group(ArgGroup::new("transport").args(["address", "simulate"])))]
pub struct Cli {
    /// Commands to send instead of polling (e.g. "AT RV")
    #[arg(value_name = "COMMAND")]
    pub commands: Vec<String>,

    /// Adapter address (host:port); overrides link.address
    #[arg(short, long, value_name = "HOST:PORT")]
    pub address: Option<String>,

    /// Talk to the built-in simulated adapter
    #[arg(short, long)]
    pub simulate: bool,

    /// Polling interval in milliseconds; overrides telemetry.poll_interval_ms
    #[arg(short, long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Gauges to poll (can be specified multiple times)
    #[arg(short, long, value_name = "GAUGE")]
    pub gauge: Vec<String>,

    /// Skip the adapter initialization sequence
    #[arg(long)]
    pub no_init: bool,

    /// Write a JSONL transcript of every exchange to PATH
    #[arg(long, value_name = "PATH")]
    pub exchange_log: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress status lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
