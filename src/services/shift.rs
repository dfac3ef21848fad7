use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use zbus::{Connection, MatchRule, MessageStream, message};

use crate::{
    aggregator::{EventSender, MediaEvent},
    config::ShiftConfig,
    services::mpris::MediaError,
};

/// Listens for the broadcast D-Bus signal asking to re-pick the active player.
///
/// Any local process may send it; no payload is read.
pub struct ShiftListener {
    connection: Connection,
    interface: String,
    member: String,
    events: EventSender,
}

impl ShiftListener {
    /// Create a listener for the configured interface and member
    pub fn new(connection: Connection, config: &ShiftConfig, events: EventSender) -> Self {
        Self {
            connection,
            interface: config.interface.clone(),
            member: config.member.clone(),
            events,
        }
    }

    /// Subscribe to the shift signal and start forwarding it.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::InitializationFailed` if the interface or
    /// member is not a valid D-Bus name, or `MediaError::DbusError` if the
    /// match rule cannot be registered.
    #[instrument(skip(self), fields(interface = %self.interface, member = %self.member))]
    pub async fn start(self) -> Result<JoinHandle<()>, MediaError> {
        let rule = MatchRule::builder()
            .msg_type(message::Type::Signal)
            .interface(self.interface.as_str())
            .and_then(|builder| builder.member(self.member.as_str()))
            .map_err(|e| MediaError::InitializationFailed(format!("Invalid shift signal: {e}")))?
            .build();

        let mut stream = MessageStream::for_match_rule(rule, &self.connection, None).await?;
        info!("Listening for shift requests");

        let events = self.events;
        Ok(tokio::spawn(async move {
            while let Some(message) = stream.next().await {
                match message {
                    Ok(message) => {
                        let header = message.header();
                        debug!(sender = ?header.sender(), "Shift requested");
                        if events.send(MediaEvent::ShiftRequested).is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("Malformed message on shift channel: {e}"),
                }
            }
        }))
    }
}
