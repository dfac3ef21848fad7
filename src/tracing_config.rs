use std::{env, io};

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{MediabarError, Result, config::ConfigPaths};

/// Log threshold for a `-v` count.
///
/// Starts at WARN and drops one level per occurrence, bottoming out at TRACE.
pub fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Initialize tracing for the application
///
/// Logs go to stderr; stdout carries the status lines. `RUST_LOG` takes
/// precedence over `level` when set. `MEDIABAR_LOG_FORMAT=json` switches to
/// JSON lines. With `log_to_file`, a daily rolling file in the mediabar log
/// directory receives the same events; keep the returned guard alive for
/// as long as logs should be flushed to it.
///
/// # Errors
/// Returns error if log file creation or tracing subscriber initialization fails
pub fn init(level: LevelFilter, log_to_file: bool) -> Result<Option<WorkerGuard>> {
    const DAYS_TO_KEEP: usize = 7;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let (file_writer, guard) = if log_to_file {
        let log_dir = ConfigPaths::log_dir()?;
        let file_appender = tracing_appender::rolling::Builder::new()
            .rotation(tracing_appender::rolling::Rotation::DAILY)
            .max_log_files(DAYS_TO_KEEP)
            .filename_prefix("mediabar")
            .filename_suffix("log")
            .build(&log_dir)
            .map_err(|e| MediabarError::Logging(e.to_string()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        (Some(non_blocking), Some(guard))
    } else {
        (None, None)
    };

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .compact()
            .with_target(true)
            .with_level(true)
            .with_writer(writer)
            .with_ansi(false)
    });

    let format = env::var("MEDIABAR_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer);

    let result = match format.as_str() {
        "json" => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .try_init(),
        _ => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| MediabarError::Logging(e.to_string()))?;

    Ok(guard)
}
