//! mediabar - prints the active media player for a Waybar custom module.
//!
//! Runs until SIGINT or SIGTERM, writing one line per state change to
//! stdout and logs to stderr.

use std::process::ExitCode;

use clap::Parser;
use mediabar::{
    Result,
    aggregator::{self, Aggregator, SelectionPolicy},
    cli::Cli,
    output::{Formatter, OutputSink},
    services::{MprisSource, ShiftListener, mpris::MediaError, signals},
    tracing_config,
};
use tracing::{debug, info, warn};
use zbus::Connection;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mediabar: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config()?;
    let _log_guard = tracing_config::init(cli.log_level(), config.logging.file)?;

    match &config.source {
        Some(path) => info!(path = %path.display(), "Loaded configuration"),
        None => info!("No config file, using defaults"),
    }
    debug!(?config, "Starting mediabar");

    let (events_tx, events_rx) = aggregator::channel();
    signals::spawn_signal_listener(events_tx.clone())?;

    let connection = Connection::session().await.map_err(|e| {
        MediaError::InitializationFailed(format!("D-Bus connection failed: {e}"))
    })?;

    let shift = ShiftListener::new(connection.clone(), &config.shift, events_tx.clone());
    if let Err(e) = shift.start().await {
        warn!("Shift signal unavailable, SIGUSR1 still works: {e}");
    }

    let source = MprisSource::start(
        connection,
        events_tx,
        config.selection.ignored_players.clone(),
    )
    .await?;

    let mut aggregator = Aggregator::new(
        source,
        SelectionPolicy::new(config.selection.player.clone()),
        Formatter::from(&config.output),
        OutputSink::stdout(&config.output),
    );
    aggregator.run(events_rx).await;

    Ok(())
}
