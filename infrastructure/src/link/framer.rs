//! Frame assembly. Splits the raw receive stream on the adapter prompt.
//!
//! The transport delivers chunks with no relation to reply boundaries: one
//! reply may arrive in several chunks, and one chunk may carry the end of a
//! reply together with the start of the next. [`FrameAssembler`] owns the
//! accumulation buffer and turns chunks into [`Frame`]s.

use elmlink_domain::{Frame, TERMINATOR, preview};
use tracing::{debug, trace};

/// Accumulates decoded text and cuts it into frames at every terminator.
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buffer: String,
}

impl FrameAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one received chunk, returning the frames it completed in order.
    ///
    /// Each chunk is decoded as UTF-8 on its own. A chunk that fails to
    /// decode contributes nothing.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Frame> {
        match std::str::from_utf8(chunk) {
            Ok(text) => self.push_str(text),
            Err(e) => {
                debug!("Framer: dropping undecodable chunk ({} bytes): {}", chunk.len(), e);
                Vec::new()
            }
        }
    }

    /// Feed already decoded text.
    pub fn push_str(&mut self, text: &str) -> Vec<Frame> {
        let mut frames = Vec::new();
        let mut rest = text;

        while let Some(pos) = rest.find(TERMINATOR) {
            self.buffer.push_str(&rest[..pos]);
            let frame = Frame::new(std::mem::take(&mut self.buffer));
            trace!("Framer: frame complete: {}", preview(frame.as_str(), 64));
            frames.push(frame);
            rest = &rest[pos + TERMINATOR.len_utf8()..];
        }

        self.buffer.push_str(rest);
        frames
    }

    /// Text received since the last terminator.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Remove and return the unterminated remainder.
    pub fn take_pending(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }
}
