//! CLI entrypoint for elmlink
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use elmlink_application::{
    ExchangeLogger, InitializeAdapterUseCase, NoExchangeLogger, PollTelemetryUseCase,
    SendCommandsUseCase, SerialConnection,
};
use elmlink_infrastructure::{
    Communicator, ConfigLoader, FileConfig, JsonlExchangeLogger, SimulatedAdapter, TcpConnection,
};
use elmlink_presentation::{Cli, ConsoleFormatter, TelemetryReporter};
use std::fs::OpenOptions;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, &cli);
    config.validate()?;

    let _log_guard = init_logging(cli.verbose, config.logging.log_file.as_deref())?;
    info!("Starting elmlink");

    // === Dependency Injection ===
    let exchange_logger: Arc<dyn ExchangeLogger> = match &config.logging.exchange_log {
        Some(path) => Arc::new(
            JsonlExchangeLogger::open(path)
                .with_context(|| format!("Could not open exchange log {}", path))?,
        ),
        None => Arc::new(NoExchangeLogger),
    };

    let connection: Arc<dyn SerialConnection> = if cli.simulate {
        info!("Using simulated adapter");
        Arc::new(SimulatedAdapter::new())
    } else {
        Arc::new(
            TcpConnection::connect(&config.link.address, config.connect_timeout())
                .await
                .with_context(|| format!("Could not connect to {}", config.link.address))?,
        )
    };

    let link = Arc::new(Communicator::spawn_with(connection, exchange_logger)?);

    let cancellation = CancellationToken::new();
    let interrupt = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping");
            interrupt.cancel();
        }
    });

    let result = if cli.commands.is_empty() {
        run_telemetry(&link, &config, &cli, cancellation).await
    } else {
        run_commands(&link, &config, &cli, cancellation).await
    };

    link.shutdown().await;
    result
}

/// Command-line flags take precedence over every configuration source
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(address) = &cli.address {
        config.link.address = address.clone();
    }
    if let Some(interval) = cli.interval {
        config.telemetry.poll_interval_ms = interval;
    }
    if !cli.gauge.is_empty() {
        config.telemetry.gauges = cli.gauge.clone();
    }
    if cli.no_init {
        config.telemetry.initialize = false;
    }
    if let Some(path) = &cli.exchange_log {
        config.logging.exchange_log = Some(path.display().to_string());
    }
}

/// Initialize logging based on verbosity level, optionally teeing to a file
fn init_logging(verbose: u8, log_file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Could not open log file {}", path))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Send each command in order and print its reply
async fn run_commands(
    link: &Arc<Communicator>,
    config: &FileConfig,
    cli: &Cli,
    cancellation: CancellationToken,
) -> Result<()> {
    let format = cli.output;
    let use_case =
        SendCommandsUseCase::new(Arc::clone(link)).with_command_timeout(config.command_timeout());

    let summary = use_case
        .execute(&cli.commands, cancellation, |outcome| {
            let line = match &outcome.result {
                Ok(reply) => ConsoleFormatter::format_reply(&outcome.command, reply, format),
                Err(e) => {
                    ConsoleFormatter::format_command_error(&outcome.command, &e.to_string(), format)
                }
            };
            println!("{}", line);
        })
        .await;

    if summary.skipped > 0 {
        warn!("{} command(s) not sent", summary.skipped);
    }
    if summary.failed > 0 {
        bail!("{} command(s) failed", summary.failed);
    }
    if summary.skipped > 0 {
        bail!("interrupted before all commands were sent");
    }
    Ok(())
}

/// Initialize the adapter, then poll gauges until Ctrl-C
async fn run_telemetry(
    link: &Arc<Communicator>,
    config: &FileConfig,
    cli: &Cli,
    cancellation: CancellationToken,
) -> Result<()> {
    let telemetry = config.telemetry_config()?;
    let reporter = TelemetryReporter::new(cli.output).quiet(cli.quiet);

    if telemetry.initialize {
        let initialize = InitializeAdapterUseCase::new(Arc::clone(link));
        tokio::select! {
            _ = cancellation.cancelled() => return Ok(()),
            result = initialize.execute_with_sink(&reporter) => result?,
        }
    }

    let poller = PollTelemetryUseCase::new(Arc::clone(link), telemetry);
    let summary = poller.run(&reporter, cancellation).await?;

    if !cli.quiet {
        eprintln!("{}", ConsoleFormatter::format_summary(&summary));
    }
    Ok(())
}
