//! Initialize Adapter use case
//!
//! Sends the adapter setup sequence as one batch right after connecting.

use crate::ports::command_link::{CommandLink, LinkError};
use crate::ports::telemetry_sink::{NoTelemetrySink, TelemetrySink};
use elmlink_domain::INITIALIZE_COMMANDS;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during adapter initialization
#[derive(Error, Debug)]
pub enum InitializeError {
    #[error("Initialization sequence failed: {0}")]
    Link(#[from] LinkError),
}

/// Use case for preparing the adapter before telemetry polling
pub struct InitializeAdapterUseCase<L: CommandLink + ?Sized + 'static> {
    link: Arc<L>,
    commands: Vec<String>,
}

impl<L: CommandLink + ?Sized + 'static> InitializeAdapterUseCase<L> {
    pub fn new(link: Arc<L>) -> Self {
        Self {
            link,
            commands: INITIALIZE_COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Replace the built-in setup sequence
    pub fn with_commands(mut self, commands: Vec<String>) -> Self {
        self.commands = commands;
        self
    }

    /// Execute the use case without status output
    pub async fn execute(&self) -> Result<(), InitializeError> {
        self.execute_with_sink(&NoTelemetrySink).await
    }

    /// Execute the use case, reporting status lines to `sink`
    pub async fn execute_with_sink(&self, sink: &dyn TelemetrySink) -> Result<(), InitializeError> {
        sink.on_status("send initialize command");
        info!("Sending {} initialization commands", self.commands.len());

        let commands: Vec<&str> = self.commands.iter().map(String::as_str).collect();
        if let Err(e) = self.link.send_all(&commands).await {
            warn!("Adapter initialization failed: {}", e);
            sink.on_status(&format!("error: {}", e));
            return Err(e.into());
        }

        sink.on_status("adapter initialized");
        info!("Adapter initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{RecordingSink, ScriptedLink};

    #[tokio::test]
    async fn sends_full_sequence_in_order() {
        let link = Arc::new(ScriptedLink::default());
        let use_case = InitializeAdapterUseCase::new(Arc::clone(&link));

        use_case.execute().await.unwrap();

        let expected: Vec<String> = INITIALIZE_COMMANDS.iter().map(|c| c.to_string()).collect();
        assert_eq!(link.sent(), expected);
    }

    #[tokio::test]
    async fn reports_status_lines() {
        let link = Arc::new(ScriptedLink::default());
        let sink = RecordingSink::default();

        InitializeAdapterUseCase::new(link)
            .with_commands(vec!["ATZ".to_string()])
            .execute_with_sink(&sink)
            .await
            .unwrap();

        let status = sink.status.lock().unwrap().clone();
        assert_eq!(status, vec!["send initialize command", "adapter initialized"]);
    }

    #[tokio::test]
    async fn surfaces_first_failure() {
        let link = Arc::new(
            ScriptedLink::default()
                .with_reply("AT E0", Err(LinkError::TransportWrite("busy".to_string()))),
        );
        let use_case = InitializeAdapterUseCase::new(Arc::clone(&link));

        let err = use_case.execute().await.unwrap_err();
        assert!(matches!(
            err,
            InitializeError::Link(LinkError::TransportWrite(_))
        ));
        // the rest of the batch still ran
        assert_eq!(link.sent().len(), INITIALIZE_COMMANDS.len());
    }
}
