//! Command queue shared between callers and the dispatcher.
//!
//! Callers hold a cloneable [`CommandQueue`] and receive a
//! [`PendingResponse`] per command; the dispatcher owns the single
//! [`CommandInbox`] and resolves each [`PendingCommand`] exactly once.

use elmlink_application::ports::exchange_logger::EVENT_QUEUED;
use elmlink_application::{ExchangeEvent, ExchangeLogger, LinkError};
use elmlink_domain::CommandText;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};
use tracing::trace;

type Reply = Result<String, LinkError>;

/// A queued command together with its completion handle.
#[derive(Debug)]
pub(crate) struct PendingCommand {
    pub id: u64,
    pub text: CommandText,
    reply: oneshot::Sender<Reply>,
}

impl PendingCommand {
    /// Resolve the command. Returns `false` if the caller stopped waiting.
    pub fn resolve(self, result: Reply) -> bool {
        self.reply.send(result).is_ok()
    }
}

/// Future of a single command's reply.
///
/// Dropping it abandons the wait only; the command keeps its place on the
/// link and its frame is still consumed when it arrives.
#[derive(Debug)]
pub struct PendingResponse {
    id: u64,
    rx: oneshot::Receiver<Reply>,
}

impl PendingResponse {
    /// Sequence number assigned when the command was queued.
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Future for PendingResponse {
    type Output = Reply;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(LinkError::DispatcherStopped)))
    }
}

/// Submission side of the queue.
#[derive(Clone)]
pub struct CommandQueue {
    tx: mpsc::UnboundedSender<PendingCommand>,
    next_id: Arc<AtomicU64>,
    stop_reason: Arc<OnceLock<LinkError>>,
    logger: Arc<dyn ExchangeLogger>,
}

impl CommandQueue {
    /// Validate and append a command; never blocks.
    ///
    /// Fails immediately with [`LinkError::InvalidCommand`] for text the
    /// adapter could not frame, or with the reason the link stopped.
    pub fn enqueue(&self, command: &str) -> Result<PendingResponse, LinkError> {
        let text = CommandText::parse(command)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply, rx) = oneshot::channel();

        self.logger.log(ExchangeEvent::new(
            EVENT_QUEUED,
            serde_json::json!({ "id": id, "command": text.as_str() }),
        ));

        self.tx
            .send(PendingCommand { id, text, reply })
            .map_err(|_| self.stop_reason())?;

        trace!("Queue: command #{} queued", id);
        Ok(PendingResponse { id, rx })
    }

    /// Reason the dispatcher stopped, if it has.
    pub fn stop_reason(&self) -> LinkError {
        self.stop_reason
            .get()
            .cloned()
            .unwrap_or(LinkError::DispatcherStopped)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving side of the queue, owned by the dispatcher.
pub(crate) struct CommandInbox {
    rx: mpsc::UnboundedReceiver<PendingCommand>,
    stop_reason: Arc<OnceLock<LinkError>>,
}

impl CommandInbox {
    pub async fn recv(&mut self) -> Option<PendingCommand> {
        self.rx.recv().await
    }

    /// Stop accepting commands and hand back everything still queued.
    ///
    /// The reason is recorded before the channel closes so that late
    /// submitters observe it instead of a generic failure.
    pub fn close(&mut self, reason: LinkError) -> Vec<PendingCommand> {
        let _ = self.stop_reason.set(reason);
        self.rx.close();

        let mut remaining = Vec::new();
        while let Ok(command) = self.rx.try_recv() {
            remaining.push(command);
        }
        remaining
    }
}

/// Create a connected queue/inbox pair.
pub(crate) fn command_queue(logger: Arc<dyn ExchangeLogger>) -> (CommandQueue, CommandInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stop_reason = Arc::new(OnceLock::new());
    (
        CommandQueue {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
            stop_reason: Arc::clone(&stop_reason),
            logger,
        },
        CommandInbox { rx, stop_reason },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use elmlink_application::NoExchangeLogger;

    fn queue() -> (CommandQueue, CommandInbox) {
        command_queue(Arc::new(NoExchangeLogger))
    }

    #[tokio::test]
    async fn test_fifo_order_and_ids() {
        let (queue, mut inbox) = queue();
        let first = queue.enqueue("ATZ").unwrap();
        let second = queue.enqueue("21 0D 01").unwrap();
        assert!(first.id() < second.id());

        assert_eq!(inbox.recv().await.unwrap().text.as_str(), "ATZ");
        assert_eq!(inbox.recv().await.unwrap().text.as_str(), "21 0D 01");
    }

    #[tokio::test]
    async fn test_resolve_reaches_caller() {
        let (queue, mut inbox) = queue();
        let pending = queue.enqueue("AT RV").unwrap();
        let command = inbox.recv().await.unwrap();
        assert!(command.resolve(Ok("12.6V".to_string())));
        assert_eq!(pending.await, Ok("12.6V".to_string()));
    }

    #[tokio::test]
    async fn test_resolve_after_caller_gave_up() {
        let (queue, mut inbox) = queue();
        drop(queue.enqueue("AT RV").unwrap());
        let command = inbox.recv().await.unwrap();
        assert!(!command.resolve(Ok("12.6V".to_string())));
    }

    #[test]
    fn test_invalid_command_never_queued() {
        let (queue, mut inbox) = queue();
        let err = queue.enqueue("ATZ\r").unwrap_err();
        assert!(matches!(err, LinkError::InvalidCommand(_)));
        assert!(inbox.rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_close_returns_queued_and_records_reason() {
        let (queue, mut inbox) = queue();
        let pending = queue.enqueue("ATZ").unwrap();

        let remaining = inbox.close(LinkError::TransportClosed);
        assert_eq!(remaining.len(), 1);
        for command in remaining {
            command.resolve(Err(LinkError::TransportClosed));
        }

        assert_eq!(pending.await, Err(LinkError::TransportClosed));
        assert_eq!(queue.enqueue("ATZ").unwrap_err(), LinkError::TransportClosed);
        assert!(queue.is_closed());
    }

    #[tokio::test]
    async fn test_dropped_inbox_reports_dispatcher_stopped() {
        let (queue, inbox) = queue();
        let pending = queue.enqueue("ATZ").unwrap();
        drop(inbox);
        assert_eq!(pending.await, Err(LinkError::DispatcherStopped));
        assert_eq!(queue.enqueue("ATZ").unwrap_err(), LinkError::DispatcherStopped);
    }
}
