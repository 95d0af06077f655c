//! Configuration file loading for elmlink
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ELMLINK_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./elmlink.toml` or `./.elmlink.toml`
//! 4. Global: `$XDG_CONFIG_HOME/elmlink/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLinkConfig, FileLoggingConfig, FileTelemetryConfig,
};
pub use loader::ConfigLoader;
