//! Dispatcher task: single owner of the receive stream and the write side.
//!
//! One background task merges the three inputs of the link:
//!
//! | Input | Effect |
//! |-------|--------|
//! | completed frame | resolves the in-flight command, reopens the gate |
//! | queued command (only while the gate admits) | becomes in-flight, gets written |
//! | cancellation / end of stream | fails everything still outstanding |
//!
//! Because every state change happens inside this task, admitting a command
//! (dequeue, mark in-flight, close the gate, start the write) cannot
//! interleave with frame handling, and no lock is needed.

use super::framer::FrameAssembler;
use super::gate::WriteGate;
use super::queue::{CommandInbox, PendingCommand};
use elmlink_application::ports::exchange_logger::{
    EVENT_CLOSED, EVENT_RECEIVE, EVENT_SPURIOUS, EVENT_WRITE, EVENT_WRITE_FAILED,
};
use elmlink_application::{ByteStream, ExchangeEvent, ExchangeLogger, LinkError, SerialConnection};
use elmlink_domain::{Frame, preview};
use futures::StreamExt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Characters of reply text shown in debug logs.
const LOG_PREVIEW_CHARS: usize = 48;

pub(crate) struct Dispatcher {
    connection: Arc<dyn SerialConnection>,
    inbox: CommandInbox,
    reads: ByteStream,
    assembler: FrameAssembler,
    gate: WriteGate,
    current: Option<PendingCommand>,
    logger: Arc<dyn ExchangeLogger>,
    cancellation: CancellationToken,
}

impl Dispatcher {
    pub fn new(
        connection: Arc<dyn SerialConnection>,
        reads: ByteStream,
        inbox: CommandInbox,
        logger: Arc<dyn ExchangeLogger>,
        cancellation: CancellationToken,
    ) -> Self {
        Self {
            connection,
            inbox,
            reads,
            assembler: FrameAssembler::new(),
            gate: WriteGate::new(),
            current: None,
            logger,
            cancellation,
        }
    }

    /// Run until shutdown or until the receive stream ends.
    pub async fn run(mut self) {
        debug!("Dispatcher: started");

        let reason = loop {
            tokio::select! {
                biased;

                _ = self.cancellation.cancelled() => break LinkError::Shutdown,

                chunk = self.reads.next() => match chunk {
                    Some(bytes) => self.on_chunk(&bytes),
                    None => break LinkError::TransportClosed,
                },

                command = self.inbox.recv(), if self.gate.is_admitting() => match command {
                    Some(command) => self.admit(command).await,
                    // Every queue handle is gone; nobody can submit again.
                    None => break LinkError::Shutdown,
                },
            }
        };

        self.stop(reason);
    }

    fn on_chunk(&mut self, bytes: &[u8]) {
        trace!("Dispatcher: received {} bytes", bytes.len());
        for frame in self.assembler.push(bytes) {
            self.on_frame(frame);
        }
    }

    fn on_frame(&mut self, frame: Frame) {
        self.gate.reopen();

        match self.current.take() {
            Some(command) => {
                debug!(
                    "Dispatcher: #{} {} -> {}",
                    command.id,
                    command.text,
                    preview(frame.as_str(), LOG_PREVIEW_CHARS)
                );
                self.logger.log(ExchangeEvent::new(
                    EVENT_RECEIVE,
                    serde_json::json!({
                        "id": command.id,
                        "command": command.text.as_str(),
                        "frame": frame.as_str(),
                    }),
                ));
                let id = command.id;
                if !command.resolve(Ok(frame.into_text())) {
                    debug!("Dispatcher: caller of #{} stopped waiting", id);
                }
            }
            None => {
                debug!(
                    "Dispatcher: discarding spurious frame: {}",
                    preview(frame.as_str(), LOG_PREVIEW_CHARS)
                );
                self.logger.log(ExchangeEvent::new(
                    EVENT_SPURIOUS,
                    serde_json::json!({ "frame": frame.as_str() }),
                ));
            }
        }
    }

    /// Make `command` the in-flight command and put it on the wire.
    ///
    /// Only an explicit transport error releases the command early. A write
    /// that is slow to complete may still have reached the adapter, so the
    /// command stays in flight and its frame resolves it.
    async fn admit(&mut self, command: PendingCommand) {
        self.gate.admit();
        let wire = command.text.to_wire();
        let id = command.id;

        debug!("Dispatcher: write #{} {}", id, command.text);
        self.logger.log(ExchangeEvent::new(
            EVENT_WRITE,
            serde_json::json!({ "id": id, "command": command.text.as_str() }),
        ));
        self.current = Some(command);

        let written = tokio::select! {
            biased;
            // The run loop observes the cancellation next and fails `current`.
            _ = self.cancellation.cancelled() => return,
            result = self.connection.write(&wire) => result,
        };

        let Err(e) = written else {
            return;
        };
        let error = e.to_string();

        warn!("Dispatcher: write of #{} failed: {}", id, error);
        self.logger.log(ExchangeEvent::new(
            EVENT_WRITE_FAILED,
            serde_json::json!({ "id": id, "error": error }),
        ));
        if let Some(command) = self.current.take() {
            command.resolve(Err(LinkError::TransportWrite(error)));
        }
        self.gate.reopen();
    }

    /// Fail the in-flight command and everything still queued.
    fn stop(mut self, reason: LinkError) {
        info!("Dispatcher: stopping ({})", reason);
        let partial = self.assembler.take_pending();

        if let Some(command) = self.current.take() {
            let error = match reason {
                LinkError::TransportClosed if !partial.is_empty() => LinkError::TruncatedFrame {
                    partial: partial.clone(),
                },
                _ => reason.clone(),
            };
            debug!("Dispatcher: failing in-flight #{}: {}", command.id, error);
            command.resolve(Err(error));
        } else if !partial.is_empty() {
            debug!(
                "Dispatcher: discarding unterminated text: {}",
                preview(&partial, LOG_PREVIEW_CHARS)
            );
        }

        let queued = self.inbox.close(reason.clone());
        if !queued.is_empty() {
            debug!("Dispatcher: failing {} queued command(s)", queued.len());
        }
        for command in queued {
            command.resolve(Err(reason.clone()));
        }

        self.logger.log(ExchangeEvent::new(
            EVENT_CLOSED,
            serde_json::json!({ "reason": reason.to_string(), "partial": partial }),
        ));
    }
}
