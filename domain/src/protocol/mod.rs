//! Wire-level vocabulary of the adapter protocol.
//!
//! The adapter speaks plain text over a single duplex channel:
//!
//! ```text
//!  host ──"21 0D 01\r"──▶ adapter
//!  host ◀──"61 0D 32\r\r>"── adapter
//! ```
//!
//! Commands are terminated with a carriage return when transmitted, and every
//! reply ends with the `>` prompt. Nothing else correlates a reply with the
//! command that produced it.

pub mod command;
pub mod frame;

/// Prompt symbol the adapter emits when it is ready for the next command.
pub const TERMINATOR: char = '>';

/// Suffix appended to every command on the wire.
pub const COMMAND_SUFFIX: char = '\r';
