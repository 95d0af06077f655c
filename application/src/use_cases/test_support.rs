//! Scripted [`CommandLink`] double shared by the use case tests.

use crate::ports::command_link::{CommandLink, LinkError};
use crate::ports::telemetry_sink::TelemetrySink;
use async_trait::async_trait;
use elmlink_domain::{Gauge, TelemetrySample};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Replies from a fixed table; unknown commands answer `OK`, stalled ones never.
#[derive(Default)]
pub struct ScriptedLink {
    replies: HashMap<String, Result<String, LinkError>>,
    stalled: HashSet<String>,
    pub sent: Mutex<Vec<String>>,
}

impl ScriptedLink {
    pub fn with_reply(mut self, command: &str, reply: Result<&str, LinkError>) -> Self {
        self.replies
            .insert(command.to_string(), reply.map(str::to_string));
        self
    }

    pub fn with_stall(mut self, command: &str) -> Self {
        self.stalled.insert(command.to_string());
        self
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandLink for ScriptedLink {
    async fn send(&self, command: &str) -> Result<String, LinkError> {
        self.sent.lock().unwrap().push(command.to_string());
        if self.stalled.contains(command) {
            std::future::pending::<()>().await;
        }
        self.replies
            .get(command)
            .cloned()
            .unwrap_or_else(|| Ok("OK".to_string()))
    }

    async fn send_all(&self, commands: &[&str]) -> Result<(), LinkError> {
        let mut first_error = None;
        for command in commands {
            if let Err(e) = self.send(command).await
                && first_error.is_none()
            {
                first_error = Some(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Records everything it is told.
#[derive(Default)]
pub struct RecordingSink {
    pub samples: Mutex<Vec<TelemetrySample>>,
    pub errors: Mutex<Vec<(Gauge, String)>>,
    pub status: Mutex<Vec<String>>,
}

impl TelemetrySink for RecordingSink {
    fn on_sample(&self, sample: &TelemetrySample) {
        self.samples.lock().unwrap().push(sample.clone());
    }

    fn on_gauge_error(&self, gauge: Gauge, error: &str) {
        self.errors.lock().unwrap().push((gauge, error.to_string()));
    }

    fn on_status(&self, message: &str) {
        self.status.lock().unwrap().push(message.to_string());
    }
}
