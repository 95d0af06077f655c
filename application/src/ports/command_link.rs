//! Command link port
//!
//! Defines the interface through which use cases talk to the adapter:
//! one command in, one reply out, serialized over a single channel.

use async_trait::async_trait;
use elmlink_domain::DomainError;
use std::time::Duration;
use thiserror::Error;

/// Errors a command can resolve with
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("Invalid command: {0}")]
    InvalidCommand(#[from] DomainError),

    #[error("Transport write failed: {0}")]
    TransportWrite(String),

    #[error("Transport closed")]
    TransportClosed,

    #[error("Transport closed mid-frame (partial reply {partial:?})")]
    TruncatedFrame { partial: String },

    #[error("Link shut down")]
    Shutdown,

    #[error("No reply within {0:?}")]
    Timeout(Duration),

    #[error("Dispatcher stopped")]
    DispatcherStopped,
}

impl LinkError {
    /// Check if the link can no longer serve any command
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LinkError::TransportClosed
                | LinkError::TruncatedFrame { .. }
                | LinkError::Shutdown
                | LinkError::DispatcherStopped
        )
    }
}

/// Serialized command/reply channel to the adapter
///
/// Implementations guarantee that at most one command is in flight and that
/// replies resolve commands in submission order.
#[async_trait]
pub trait CommandLink: Send + Sync {
    /// Queue a command and wait for its reply frame
    async fn send(&self, command: &str) -> Result<String, LinkError>;

    /// Queue every command in order, then wait for all of them.
    ///
    /// Individual replies are discarded. The first failure in submission
    /// order is returned once every command has resolved.
    async fn send_all(&self, commands: &[&str]) -> Result<(), LinkError>;

    /// Like [`send`](Self::send), giving up the wait after `timeout`.
    ///
    /// The command itself is not withdrawn from the link.
    async fn send_with_timeout(
        &self,
        command: &str,
        timeout: Duration,
    ) -> Result<String, LinkError> {
        tokio::time::timeout(timeout, self.send(command))
            .await
            .map_err(|_| LinkError::Timeout(timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_errors() {
        assert!(LinkError::Shutdown.is_terminal());
        assert!(LinkError::TransportClosed.is_terminal());
        assert!(
            LinkError::TruncatedFrame {
                partial: "41 0".to_string()
            }
            .is_terminal()
        );
        assert!(!LinkError::TransportWrite("busy".to_string()).is_terminal());
        assert!(!LinkError::Timeout(Duration::from_secs(1)).is_terminal());
    }

    #[test]
    fn test_invalid_command_from_domain() {
        let err: LinkError = DomainError::ReservedCharacter {
            command: ">".to_string(),
            found: '>',
        }
        .into();
        assert!(matches!(err, LinkError::InvalidCommand(_)));
    }
}
