//! Infrastructure layer for elmlink
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the command link with its dispatcher task, the
//! transports it runs over, configuration file loading, and the JSONL
//! exchange transcript.

pub mod config;
pub mod link;
pub mod logging;
pub mod transport;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLinkConfig, FileLoggingConfig,
    FileTelemetryConfig,
};
pub use link::{Communicator, PendingResponse};
pub use logging::JsonlExchangeLogger;
pub use transport::{DEFAULT_ADDRESS, SimulatedAdapter, TcpConnection};
