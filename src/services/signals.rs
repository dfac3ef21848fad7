use std::io;

use tokio::{
    signal::unix::{SignalKind, signal},
    task::JoinHandle,
};
use tracing::debug;

use crate::aggregator::{EventSender, MediaEvent};

/// Translate process signals into events.
///
/// SIGINT and SIGTERM become [`MediaEvent::Interrupt`], SIGUSR1 becomes
/// [`MediaEvent::ShiftRequested`]. SIGPIPE is left ignored, as the Rust
/// runtime sets it up, so a closed stdout only surfaces as write errors.
///
/// # Errors
///
/// Returns an error if a signal handler cannot be registered.
pub fn spawn_signal_listener(events: EventSender) -> io::Result<JoinHandle<()>> {
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut shift = signal(SignalKind::user_defined1())?;

    Ok(tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                _ = interrupt.recv() => MediaEvent::Interrupt,
                _ = terminate.recv() => MediaEvent::Interrupt,
                _ = shift.recv() => MediaEvent::ShiftRequested,
            };

            debug!(?event, "Received process signal");
            if events.send(event).is_err() {
                break;
            }
        }
    }))
}
