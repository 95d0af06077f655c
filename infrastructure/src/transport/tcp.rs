//! TCP connection to a WiFi adapter.
//!
//! WiFi ELM327 clones expose the serial line as a plain TCP socket
//! (conventionally `192.168.0.10:35000`). The read half is owned by a
//! background task that forwards every chunk into a channel; the write half
//! sits behind a mutex so writes are serialized.

use async_trait::async_trait;
use elmlink_application::{ByteStream, SerialConnection, TransportError};
use futures::StreamExt;
use std::sync::Mutex as StdMutex;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

/// Address of most WiFi adapters out of the box.
pub const DEFAULT_ADDRESS: &str = "192.168.0.10:35000";

/// Read buffer size; adapter replies are far shorter.
const READ_BUFFER_SIZE: usize = 512;

/// Chunks buffered between the reader task and the link.
const READ_CHANNEL_CAPACITY: usize = 64;

/// Adapter reachable over TCP.
pub struct TcpConnection {
    writer: Mutex<BufWriter<OwnedWriteHalf>>,
    reads: StdMutex<Option<mpsc::Receiver<Vec<u8>>>>,
    reader_handle: JoinHandle<()>,
}

impl TcpConnection {
    /// Connect, giving up after `timeout`.
    pub async fn connect(address: &str, timeout: Duration) -> Result<Self, TransportError> {
        debug!("Connecting to adapter at {}", address);

        let stream = tokio::time::timeout(timeout, TcpStream::connect(address))
            .await
            .map_err(|_| {
                TransportError::Io(format!("connect to {} timed out after {:?}", address, timeout))
            })??;
        stream.set_nodelay(true)?;
        info!("Connected to adapter at {}", stream.peer_addr()?);

        Ok(Self::from_stream(stream))
    }

    fn from_stream(stream: TcpStream) -> Self {
        let (read_half, write_half) = stream.into_split();
        let (tx, rx) = mpsc::channel(READ_CHANNEL_CAPACITY);
        let reader_handle = tokio::spawn(Self::reader_loop(read_half, tx));

        Self {
            writer: Mutex::new(BufWriter::new(write_half)),
            reads: StdMutex::new(Some(rx)),
            reader_handle,
        }
    }

    /// Single owner of the read half; ends on EOF or error.
    async fn reader_loop(mut read_half: OwnedReadHalf, tx: mpsc::Sender<Vec<u8>>) {
        let mut buf = [0u8; READ_BUFFER_SIZE];
        loop {
            match read_half.read(&mut buf).await {
                Ok(0) => {
                    info!("Adapter closed the connection");
                    break;
                }
                Ok(n) => {
                    trace!("TCP: read {} bytes", n);
                    if tx.send(buf[..n].to_vec()).await.is_err() {
                        debug!("TCP: receive stream dropped, stopping reader");
                        break;
                    }
                }
                Err(e) => {
                    warn!("TCP: read failed: {}", e);
                    break;
                }
            }
        }
    }
}

#[async_trait]
impl SerialConnection for TcpConnection {
    async fn write(&self, data: &[u8]) -> Result<(), TransportError> {
        let mut writer = self.writer.lock().await;
        writer.write_all(data).await?;
        writer.flush().await?;
        trace!("TCP: wrote {} bytes", data.len());
        Ok(())
    }

    fn read(&self) -> Result<ByteStream, TransportError> {
        let rx = self
            .reads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .ok_or(TransportError::ReadStreamTaken)?;

        Ok(
            futures::stream::unfold(rx, |mut rx| async move {
                rx.recv().await.map(|chunk| (chunk, rx))
            })
            .boxed(),
        )
    }
}

impl Drop for TcpConnection {
    fn drop(&mut self) {
        self.reader_handle.abort();
    }
}
