//! Serial connection port
//!
//! Models the physical link to the adapter (BLE characteristic pair, TCP
//! socket, serial port) as an opaque duplex byte channel. Discovery and
//! connection lifecycle stay with the implementation.

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

/// Live sequence of received byte chunks.
///
/// Chunks arrive in order and may be empty, split mid-reply, or merge
/// several replies. The stream ends when the peer disconnects.
pub type ByteStream = BoxStream<'static, Vec<u8>>;

/// Errors raised by a serial connection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Write rejected: {0}")]
    WriteRejected(String),

    #[error("Not connected")]
    NotConnected,

    #[error("Read stream already taken")]
    ReadStreamTaken,

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        TransportError::Io(e.to_string())
    }
}

/// Duplex byte channel to the adapter
#[async_trait]
pub trait SerialConnection: Send + Sync {
    /// Write one payload; resolves once the peer acknowledged it
    async fn write(&self, data: &[u8]) -> Result<(), TransportError>;

    /// Take the receive stream.
    ///
    /// There is a single reader per connection; a second call returns
    /// [`TransportError::ReadStreamTaken`].
    fn read(&self) -> Result<ByteStream, TransportError>;
}
