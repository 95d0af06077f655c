//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Command contains reserved character {found:?}: {command}")]
    ReservedCharacter { command: String, found: char },

    #[error("Malformed response {raw:?}: {reason}")]
    MalformedResponse { raw: String, reason: String },

    #[error("Unknown gauge: {0}")]
    UnknownGauge(String),
}

impl DomainError {
    /// Check if this error was caused by an unusable device response
    pub fn is_response_error(&self) -> bool {
        matches!(self, DomainError::MalformedResponse { .. })
    }
}
