//! Command/reply link over a single adapter connection.
//!
//! The adapter answers every command with free-form text terminated by a
//! `>` prompt and accepts nothing while it is busy, so the link keeps at
//! most one command in flight:
//!
//! ```text
//! callers ──send()──▶ CommandQueue ──▶ Dispatcher ──write──▶ SerialConnection
//!    ▲                                   │  ▲                      │
//!    └──────── PendingResponse ◀─────────┘  └── FrameAssembler ◀──┘ read
//! ```
//!
//! - [`framer::FrameAssembler`]: turns received chunks into frames
//! - [`gate::WriteGate`]: open between a frame and the next admission
//! - [`queue::CommandQueue`]: FIFO of submitted commands
//! - [`communicator::Communicator`]: spawns the dispatcher, implements
//!   [`CommandLink`](elmlink_application::CommandLink)

pub mod communicator;
mod dispatcher;
pub mod framer;
pub mod gate;
pub mod queue;

#[cfg(test)]
pub(crate) mod testing;

pub use communicator::Communicator;
pub use queue::PendingResponse;
