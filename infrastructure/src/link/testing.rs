//! Scripted connection double for link tests.

use async_trait::async_trait;
use elmlink_application::{ByteStream, SerialConnection, TransportError};
use futures::StreamExt;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Connection whose receive side is driven by a [`ScriptedPeer`].
pub(crate) struct ScriptedConnection {
    writes: mpsc::UnboundedSender<String>,
    reads: Mutex<Option<mpsc::UnboundedReceiver<Vec<u8>>>>,
    failing: Mutex<HashSet<String>>,
    stalling: Mutex<HashSet<String>>,
    delayed: Mutex<HashMap<String, Duration>>,
}

/// The adapter side of a [`ScriptedConnection`].
pub(crate) struct ScriptedPeer {
    chunks: Option<mpsc::UnboundedSender<Vec<u8>>>,
    writes: mpsc::UnboundedReceiver<String>,
    seen: Vec<String>,
}

impl ScriptedConnection {
    pub fn new() -> (Arc<Self>, ScriptedPeer) {
        let (chunk_tx, chunk_rx) = mpsc::unbounded_channel();
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let connection = Arc::new(Self {
            writes: write_tx,
            reads: Mutex::new(Some(chunk_rx)),
            failing: Mutex::new(HashSet::new()),
            stalling: Mutex::new(HashSet::new()),
            delayed: Mutex::new(HashMap::new()),
        });
        let peer = ScriptedPeer {
            chunks: Some(chunk_tx),
            writes: write_rx,
            seen: Vec::new(),
        };
        (connection, peer)
    }

    /// Reject every write of `command`.
    pub fn fail_writes_of(&self, command: &str) {
        self.failing.lock().unwrap().insert(format!("{}\r", command));
    }

    /// Never acknowledge writes of `command`.
    pub fn stall_writes_of(&self, command: &str) {
        self.stalling.lock().unwrap().insert(format!("{}\r", command));
    }

    /// Deliver writes of `command` at once but complete them after `delay`.
    pub fn delay_acks_of(&self, command: &str, delay: Duration) {
        self.delayed
            .lock()
            .unwrap()
            .insert(format!("{}\r", command), delay);
    }
}

#[async_trait]
impl SerialConnection for ScriptedConnection {
    async fn write(&self, data: &[u8]) -> Result<(), TransportError> {
        let text = String::from_utf8_lossy(data).into_owned();
        if self.failing.lock().unwrap().contains(&text) {
            return Err(TransportError::WriteRejected("scripted failure".to_string()));
        }
        if self.stalling.lock().unwrap().contains(&text) {
            std::future::pending::<()>().await;
        }
        let delay = self.delayed.lock().unwrap().get(&text).copied();
        let _ = self.writes.send(text);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    fn read(&self) -> Result<ByteStream, TransportError> {
        let rx = self
            .reads
            .lock()
            .unwrap()
            .take()
            .ok_or(TransportError::ReadStreamTaken)?;
        Ok(futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|chunk| (chunk, rx))
        })
        .boxed())
    }
}

impl ScriptedPeer {
    /// Deliver one chunk to the link.
    pub fn reply(&self, text: &str) {
        if let Some(chunks) = &self.chunks {
            let _ = chunks.send(text.as_bytes().to_vec());
        }
    }

    /// End the receive stream.
    pub fn hang_up(&mut self) {
        self.chunks = None;
    }

    /// Next written payload; panics if none arrives within a second.
    pub async fn next_write(&mut self) -> String {
        self.try_next_write(Duration::from_secs(1))
            .await
            .expect("no write within 1s")
    }

    pub async fn try_next_write(&mut self, wait: Duration) -> Option<String> {
        let written = tokio::time::timeout(wait, self.writes.recv()).await.ok()??;
        self.seen.push(written.clone());
        Some(written)
    }

    /// Every payload observed so far, in write order.
    pub fn writes(&self) -> Vec<String> {
        self.seen.clone()
    }
}
