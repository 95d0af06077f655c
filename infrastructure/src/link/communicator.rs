//! Communicator: the public face of the link.
//!
//! Wraps a [`SerialConnection`] with the dispatcher task and exposes
//! `send` / `send_all` to any number of concurrent callers.

use super::dispatcher::Dispatcher;
use super::queue::{CommandQueue, PendingResponse, command_queue};
use async_trait::async_trait;
use elmlink_application::{
    CommandLink, ExchangeLogger, LinkError, NoExchangeLogger, SerialConnection, TransportError,
};
use futures::future::join_all;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Command/reply multiplexer over one adapter connection.
///
/// Any number of tasks may call [`send`](Self::send) concurrently; commands
/// go out one at a time in submission order and each resolves with the next
/// frame the adapter produces after it was written.
///
/// Must be created inside a Tokio runtime. Dropping the communicator stops
/// the dispatcher; outstanding commands then fail with
/// [`LinkError::Shutdown`].
pub struct Communicator {
    queue: CommandQueue,
    cancellation: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Communicator {
    /// Start a link with default settings and no exchange log.
    pub fn spawn(connection: Arc<dyn SerialConnection>) -> Result<Self, TransportError> {
        Self::spawn_with(connection, Arc::new(NoExchangeLogger))
    }

    /// Start a link, taking the connection's receive stream.
    pub fn spawn_with(
        connection: Arc<dyn SerialConnection>,
        logger: Arc<dyn ExchangeLogger>,
    ) -> Result<Self, TransportError> {
        let reads = connection.read()?;
        let (queue, inbox) = command_queue(Arc::clone(&logger));
        let cancellation = CancellationToken::new();

        let dispatcher = Dispatcher::new(connection, reads, inbox, logger, cancellation.clone());
        let task = tokio::spawn(dispatcher.run());
        debug!("Communicator: link started");

        Ok(Self {
            queue,
            cancellation,
            task: Mutex::new(Some(task)),
        })
    }

    /// Queue a command without waiting for its reply.
    pub fn enqueue(&self, command: &str) -> Result<PendingResponse, LinkError> {
        self.queue.enqueue(command)
    }

    /// Queue a command and wait for its reply frame.
    pub async fn send(&self, command: &str) -> Result<String, LinkError> {
        self.enqueue(command)?.await
    }

    /// Queue all commands contiguously, then wait for every one of them.
    ///
    /// Replies are discarded. Commands from other callers may run before
    /// or after the batch but never inside it. Returns the first failure in
    /// submission order.
    pub async fn send_all(&self, commands: &[&str]) -> Result<(), LinkError> {
        let pending: Vec<_> = commands.iter().map(|c| self.enqueue(c)).collect();
        let results = join_all(pending.into_iter().map(|p| async move { p?.await })).await;

        match results.into_iter().find_map(Result::err) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Whether the dispatcher still accepts commands.
    pub fn is_running(&self) -> bool {
        !self.queue.is_closed()
    }

    /// Stop the link and wait for the dispatcher to finish.
    ///
    /// Every outstanding command resolves with [`LinkError::Shutdown`], as
    /// does every later submission. Calling it again is a no-op.
    pub async fn shutdown(&self) {
        self.cancellation.cancel();
        let task = self.task.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(task) = task
            && let Err(e) = task.await
        {
            warn!("Communicator: dispatcher task ended abnormally: {}", e);
        }
    }
}

impl Drop for Communicator {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}

#[async_trait]
impl CommandLink for Communicator {
    async fn send(&self, command: &str) -> Result<String, LinkError> {
        Communicator::send(self, command).await
    }

    async fn send_all(&self, commands: &[&str]) -> Result<(), LinkError> {
        Communicator::send_all(self, commands).await
    }
}
