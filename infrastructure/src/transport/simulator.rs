//! In-process adapter simulator.
//!
//! Behaves enough like an ELM327 on a Subaru ECU to exercise the whole
//! stack without hardware: greets with a prompt, honours echo on/off,
//! answers `AT` commands with `OK`, and produces drifting gauge readings.
//! Replies are delivered in two chunks to exercise frame reassembly.

use async_trait::async_trait;
use elmlink_application::{ByteStream, SerialConnection, TransportError};
use elmlink_domain::{COMMAND_SUFFIX, Gauge, TERMINATOR};
use futures::StreamExt;
use std::sync::Mutex;
use tokio::sync::mpsc;
use tracing::trace;

const BANNER: &str = "ELM327 v1.5";
const BATTERY_VOLTAGE: &str = "12.6V";

#[derive(Debug)]
struct SimulatorState {
    echo: bool,
    last_command: String,
    tick: u32,
}

/// Simulated adapter implementing [`SerialConnection`].
pub struct SimulatedAdapter {
    state: Mutex<SimulatorState>,
    chunks: Mutex<Option<mpsc::UnboundedSender<Vec<u8>>>>,
    reads: Mutex<Option<mpsc::UnboundedReceiver<Vec<u8>>>>,
}

impl SimulatedAdapter {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        // Power-on greeting; arrives before any command is in flight.
        let _ = tx.send(format!("{}\r\r{}", BANNER, TERMINATOR).into_bytes());

        Self {
            state: Mutex::new(SimulatorState {
                echo: true,
                last_command: String::new(),
                tick: 0,
            }),
            chunks: Mutex::new(Some(tx)),
            reads: Mutex::new(Some(rx)),
        }
    }

    /// Drop the connection; the receive stream ends.
    pub fn disconnect(&self) {
        self.chunks.lock().unwrap_or_else(|e| e.into_inner()).take();
    }

    fn respond(state: &mut SimulatorState, command: &str) -> String {
        match compact(command).as_str() {
            "ATZ" | "ATWS" => {
                state.echo = true;
                BANNER.to_string()
            }
            "ATI" => BANNER.to_string(),
            "ATE0" => {
                state.echo = false;
                "OK".to_string()
            }
            "ATE1" => {
                state.echo = true;
                "OK".to_string()
            }
            "ATRV" => BATTERY_VOLTAGE.to_string(),
            "210001" => "61 00 08 3E 98 01".to_string(),
            at if at.starts_with("AT") => "OK".to_string(),
            other => match Gauge::ALL.iter().find(|g| compact(g.command()) == other) {
                Some(gauge) => {
                    state.tick = state.tick.wrapping_add(1);
                    gauge_reply(*gauge, state.tick)
                }
                None => "NO DATA".to_string(),
            },
        }
    }
}

impl Default for SimulatedAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// Uppercase with whitespace removed, the way the adapter reads commands.
fn compact(command: &str) -> String {
    command
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Reply for `gauge`: mode `61` echo of the PID followed by the value bytes.
fn gauge_reply(gauge: Gauge, tick: u32) -> String {
    match gauge {
        Gauge::Speed => format!("61 0D {:02X}", 40 + tick % 60),
        Gauge::EngineRpm => {
            let raw = (800 + (tick * 137) % 5200) * 4;
            format!("61 0C {:02X} {:02X}", raw >> 8, raw & 0xff)
        }
        Gauge::Boost => format!("61 0B {:02X}", 100 + tick % 80),
    }
}

#[async_trait]
impl SerialConnection for SimulatedAdapter {
    async fn write(&self, data: &[u8]) -> Result<(), TransportError> {
        let text = String::from_utf8_lossy(data);
        let command = text.trim_end_matches(COMMAND_SUFFIX);

        let reply = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            let command = if command.is_empty() {
                state.last_command.clone()
            } else {
                state.last_command = command.to_string();
                command.to_string()
            };

            // Echo reflects the setting in force when the command arrived.
            let echo_on = state.echo;
            let body = Self::respond(&mut state, &command);
            let echo = if echo_on && !command.is_empty() {
                format!("{}\r", command)
            } else {
                String::new()
            };
            format!("{}{}\r\r{}", echo, body, TERMINATOR)
        };

        trace!("Simulator: {:?} -> {:?}", command, reply);

        let chunks = self.chunks.lock().unwrap_or_else(|e| e.into_inner());
        let tx = chunks.as_ref().ok_or(TransportError::NotConnected)?;

        // Replies are ASCII, so any byte index is a char boundary.
        let (head, tail) = reply.split_at(reply.len() / 2);
        for part in [head, tail] {
            tx.send(part.as_bytes().to_vec())
                .map_err(|_| TransportError::NotConnected)?;
        }
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
