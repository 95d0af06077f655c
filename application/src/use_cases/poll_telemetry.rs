//! Poll Telemetry use case
//!
//! Periodically requests every configured gauge over the command link and
//! forwards the converted readings to a [`TelemetrySink`].
//!
//! Gauges are requested one after another within a round, so the poller
//! never has more than one of its own commands queued. Other callers may
//! still interleave their commands on the shared link.

use crate::config::TelemetryConfig;
use crate::ports::command_link::{CommandLink, LinkError};
use crate::ports::telemetry_sink::TelemetrySink;
use elmlink_domain::{DomainError, Gauge, TelemetrySample};
use std::sync::Arc;
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors for a single gauge request
#[derive(Error, Debug)]
pub enum PollTelemetryError {
    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    #[error("Unusable reply: {0}")]
    Reply(#[from] DomainError),
}

impl PollTelemetryError {
    /// Check if polling cannot continue after this error
    pub fn is_terminal(&self) -> bool {
        matches!(self, PollTelemetryError::Link(e) if e.is_terminal())
    }
}

/// Counters reported when polling stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollSummary {
    pub rounds: u64,
    pub samples: u64,
    pub errors: u64,
}

/// Use case for periodic telemetry polling
pub struct PollTelemetryUseCase<L: CommandLink + ?Sized + 'static> {
    link: Arc<L>,
    config: TelemetryConfig,
}

impl<L: CommandLink + ?Sized + 'static> PollTelemetryUseCase<L> {
    pub fn new(link: Arc<L>, config: TelemetryConfig) -> Self {
        Self { link, config }
    }

    /// Request and convert a single gauge
    pub async fn poll_once(&self, gauge: Gauge) -> Result<TelemetrySample, PollTelemetryError> {
        let command = gauge.command();
        let reply = match self.config.command_timeout {
            Some(timeout) => self.link.send_with_timeout(command, timeout).await?,
            None => self.link.send(command).await?,
        };
        Ok(TelemetrySample::from_response(gauge, &reply)?)
    }

    /// Poll until `cancellation` fires or the link stops.
    ///
    /// Non-terminal failures (write rejected, timeout, malformed reply) are
    /// reported to the sink and polling continues. A terminal link error ends
    /// polling with that error.
    pub async fn run(
        &self,
        sink: &dyn TelemetrySink,
        cancellation: CancellationToken,
    ) -> Result<PollSummary, PollTelemetryError> {
        let mut summary = PollSummary::default();
        let mut interval = tokio::time::interval(self.config.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Polling {} gauges every {:?}",
            self.config.gauges.len(),
            self.config.poll_interval
        );

        loop {
            tokio::select! {
                biased;
                _ = cancellation.cancelled() => break,
                _ = interval.tick() => {}
            }

            let round = tokio::select! {
                biased;
                _ = cancellation.cancelled() => break,
                round = self.poll_round(sink, &mut summary) => round,
            };
            summary.rounds += 1;

            if let Err(e) = round {
                warn!("Telemetry polling stopped: {}", e);
                sink.on_status(&format!("error: {}", e));
                return Err(e);
            }
        }

        info!(
            "Telemetry polling cancelled after {} rounds ({} samples, {} errors)",
            summary.rounds, summary.samples, summary.errors
        );
        Ok(summary)
    }

    async fn poll_round(
        &self,
        sink: &dyn TelemetrySink,
        summary: &mut PollSummary,
    ) -> Result<(), PollTelemetryError> {
        for gauge in &self.config.gauges {
            match self.poll_once(*gauge).await {
                Ok(sample) => {
                    debug!("{} = {} {}", gauge, sample.value, gauge.unit());
                    summary.samples += 1;
                    sink.on_sample(&sample);
                }
                Err(e) if e.is_terminal() => return Err(e),
                Err(e) => {
                    debug!("{} request failed: {}", gauge, e);
                    summary.errors += 1;
                    sink.on_gauge_error(*gauge, &e.to_string());
                }
            }
        }
        Ok(())
    }
}
