use std::collections::HashMap;

use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::debug;
use zbus::{proxy::PropertyChanged, zvariant::OwnedValue};

use super::{MediaPlayer2PlayerProxy, PlaybackStatus, PlayerId, PlayerOrder, TrackMetadata};
use crate::aggregator::{EventSender, MediaEvent};

/// Forwards a player's property changes into the event queue
#[derive(Clone)]
pub struct PlayerMonitoring {
    events: EventSender,
    order: PlayerOrder,
}

impl PlayerMonitoring {
    /// Create a new player monitoring handler
    pub fn new(events: EventSender, order: PlayerOrder) -> Self {
        Self { events, order }
    }

    /// Start monitoring a player's playback status and metadata
    pub fn start_monitoring(
        &self,
        player_id: PlayerId,
        player_proxy: MediaPlayer2PlayerProxy<'static>,
    ) -> JoinHandle<()> {
        let monitoring = self.clone();

        tokio::spawn(async move {
            monitoring
                .run_property_monitoring_loop(player_id, player_proxy)
                .await;
        })
    }

    async fn run_property_monitoring_loop(
        &self,
        player_id: PlayerId,
        player_proxy: MediaPlayer2PlayerProxy<'static>,
    ) {
        let mut playback_status_changes = player_proxy.receive_playback_status_changed().await;
        let mut metadata_changes = player_proxy.receive_metadata_changed().await;

        loop {
            let delivered = tokio::select! {
                Some(signal) = playback_status_changes.next() => {
                    self.handle_playback_status_signal(&player_id, signal).await
                }
                Some(signal) = metadata_changes.next() => {
                    self.handle_metadata_signal(&player_id, signal).await
                }
                else => {
                    debug!("Property updates stopped for player {player_id}");
                    return;
                }
            };

            if !delivered {
                debug!("Event queue closed, stopping monitoring of {player_id}");
                return;
            }
        }
    }

    async fn handle_playback_status_signal(
        &self,
        player_id: &PlayerId,
        signal: PropertyChanged<'_, String>,
    ) -> bool {
        let Ok(status) = signal.get().await else {
            return true;
        };

        let status = PlaybackStatus::from(status.as_str());
        if status == PlaybackStatus::Playing {
            self.order.promote(player_id).await;
        }

        self.events
            .send(MediaEvent::PlaybackChanged {
                player_id: player_id.clone(),
                status,
            })
            .is_ok()
    }

    async fn handle_metadata_signal(
        &self,
        player_id: &PlayerId,
        signal: PropertyChanged<'_, HashMap<String, OwnedValue>>,
    ) -> bool {
        let Ok(metadata_map) = signal.get().await else {
            return true;
        };

        self.events
            .send(MediaEvent::MetadataChanged {
                player_id: player_id.clone(),
                metadata: TrackMetadata::from(metadata_map),
            })
            .is_ok()
    }
}
