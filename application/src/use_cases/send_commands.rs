//! Send Commands use case
//!
//! Sends a list of raw commands one after another and hands each outcome to
//! a callback as soon as it resolves.

use crate::ports::command_link::{CommandLink, LinkError};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Result of one command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub command: String,
    pub result: Result<String, LinkError>,
}

/// Counters reported when the run ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendSummary {
    pub sent: usize,
    pub failed: usize,
    /// Commands never sent because the link stopped or the run was cancelled
    pub skipped: usize,
}

/// Use case for sending user-supplied commands in order
pub struct SendCommandsUseCase<L: CommandLink + ?Sized + 'static> {
    link: Arc<L>,
    command_timeout: Option<Duration>,
}

impl<L: CommandLink + ?Sized + 'static> SendCommandsUseCase<L> {
    pub fn new(link: Arc<L>) -> Self {
        Self {
            link,
            command_timeout: None,
        }
    }

    /// Give up waiting for a reply after `timeout`
    pub fn with_command_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Send `commands` in order until done, cancelled, or the link stops.
    pub async fn execute(
        &self,
        commands: &[String],
        cancellation: CancellationToken,
        mut on_outcome: impl FnMut(&CommandOutcome),
    ) -> SendSummary {
        let mut summary = SendSummary::default();
        info!("Sending {} commands", commands.len());

        for (index, command) in commands.iter().enumerate() {
            let result = tokio::select! {
                biased;
                _ = cancellation.cancelled() => {
                    info!("Cancelled, skipping remaining commands");
                    summary.skipped = commands.len() - index;
                    break;
                }
                result = self.send(command) => result,
            };

            summary.sent += 1;
            let terminal = match &result {
                Ok(_) => false,
                Err(e) => {
                    debug!("{} failed: {}", command, e);
                    summary.failed += 1;
                    e.is_terminal()
                }
            };
            on_outcome(&CommandOutcome {
                command: command.clone(),
                result,
            });

            if terminal {
                warn!("Link stopped, skipping remaining commands");
                summary.skipped = commands.len() - index - 1;
                break;
            }
        }

        summary
    }

    async fn send(&self, command: &str) -> Result<String, LinkError> {
        match self.command_timeout {
            Some(timeout) => self.link.send_with_timeout(command, timeout).await,
            None => self.link.send(command).await,
        }
    }
}
