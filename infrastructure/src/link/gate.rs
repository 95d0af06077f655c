//! Write gate deciding when the next command may go on the wire.

use tracing::trace;

/// Admission flip-flop of the link.
///
/// Open at startup (the adapter greets with a prompt before any command),
/// closed by every admission, reopened by every completed frame or failed
/// write. There is no timeout: a command whose reply never arrives keeps
/// the gate closed until the link is torn down.
#[derive(Debug)]
pub struct WriteGate {
    admitting: bool,
}

impl WriteGate {
    pub fn new() -> Self {
        Self { admitting: true }
    }

    pub fn is_admitting(&self) -> bool {
        self.admitting
    }

    /// A command was admitted for transmission.
    pub fn admit(&mut self) {
        debug_assert!(self.admitting, "command admitted through a closed gate");
        self.admitting = false;
        trace!("Gate: closed");
    }

    /// A frame completed or the in-flight write failed.
    pub fn reopen(&mut self) {
        if !self.admitting {
            trace!("Gate: open");
        }
        self.admitting = true;
    }
}

impl Default for WriteGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_admitting() {
        assert!(WriteGate::new().is_admitting());
    }

    #[test]
    fn admit_then_reopen() {
        let mut gate = WriteGate::new();
        gate.admit();
        assert!(!gate.is_admitting());
        gate.reopen();
        assert!(gate.is_admitting());
    }

    #[test]
    fn reopen_is_idempotent() {
        let mut gate = WriteGate::new();
        gate.reopen();
        gate.reopen();
        assert!(gate.is_admitting());
    }
}
