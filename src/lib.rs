//! mediabar - the active MPRIS media player as a status bar line.
//!
//! Players appear and vanish on the D-Bus session bus at any time; mediabar
//! tracks all of them, keeps exactly one "active" and prints a line every
//! time the active player's state changes. Lines are bare text or Waybar
//! JSON records, flushed one at a time to stdout.
//!
//! - [`services`] produces events: player discovery and property changes,
//!   the D-Bus shift signal and process signals
//! - [`aggregator`] consumes them in order and picks the active player
//! - [`output`] formats and writes the status line
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mediabar::{
//!     aggregator::{self, Aggregator, SelectionPolicy},
//!     config::Config,
//!     output::{Formatter, OutputSink},
//!     services::MprisSource,
//! };
//!
//! # async fn run() -> mediabar::Result<()> {
//! let config = Config::default();
//! let (events_tx, events_rx) = aggregator::channel();
//! let connection = zbus::Connection::session()
//!     .await
//!     .map_err(mediabar::services::mpris::MediaError::from)?;
//! let source = MprisSource::start(connection, events_tx, Vec::new()).await?;
//!
//! let mut aggregator = Aggregator::new(
//!     source,
//!     SelectionPolicy::new(None),
//!     Formatter::from(&config.output),
//!     OutputSink::stdout(&config.output),
//! );
//! aggregator.run(events_rx).await;
//! # Ok(())
//! # }
//! ```

/// Active-player selection and event aggregation.
pub mod aggregator;

/// Command-line interface.
pub mod cli;

/// Configuration schema and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Status line formatting and output.
pub mod output;

/// Event producers: MPRIS, shift signal, process signals.
pub mod services;

/// Tracing subscriber setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{MediabarError, Result};
