//! Port for structured exchange logging.
//!
//! Defines the [`ExchangeLogger`] trait for recording every step of the
//! command/reply traffic (queued, written, received, discarded) to a
//! structured transcript.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the raw
//! exchange transcript in a machine-readable format (JSONL).

use serde_json::Value;

/// Command accepted into the queue.
pub const EVENT_QUEUED: &str = "queued";
/// Command written to the transport.
pub const EVENT_WRITE: &str = "write";
/// Transport rejected the write.
pub const EVENT_WRITE_FAILED: &str = "write_failed";
/// Frame resolved the current command.
pub const EVENT_RECEIVE: &str = "receive";
/// Frame arrived with nothing in flight.
pub const EVENT_SPURIOUS: &str = "spurious";
/// Link stopped (shutdown or transport closed).
pub const EVENT_CLOSED: &str = "closed";

/// A structured exchange event for logging.
///
/// Each event has a type string and a JSON payload containing event-specific
/// fields; the logger adds the timestamp.
pub struct ExchangeEvent {
    /// Event type identifier (one of the `EVENT_*` constants).
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ExchangeEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging exchange events to a structured log.
///
/// The `log` method is synchronous and infallible so that it can be called
/// from the dispatch loop without affecting it; logging failures are
/// ignored.
pub trait ExchangeLogger: Send + Sync {
    /// Record an exchange event.
    fn log(&self, event: ExchangeEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoExchangeLogger;

impl ExchangeLogger for NoExchangeLogger {
    fn log(&self, _event: ExchangeEvent) {}
}
