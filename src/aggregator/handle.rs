use tokio::task::JoinHandle;

use crate::services::mpris::{PlaybackStatus, PlayerId, TrackMetadata};

/// Live snapshot of one player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    /// Backend name, e.g. `spotify`
    pub player_name: String,

    /// Current playback status
    pub playback_status: PlaybackStatus,

    /// Current track metadata
    pub metadata: TrackMetadata,
}

/// One tracked player: its identity, its latest state and the
/// subscription delivering its change notifications.
///
/// Dropping the handle cancels the subscription.
#[derive(Debug)]
pub struct PlayerHandle {
    id: PlayerId,
    state: PlayerState,
    subscription: Option<JoinHandle<()>>,
}

impl PlayerHandle {
    /// Create a handle from the player's current state
    pub fn new(id: PlayerId, playback_status: PlaybackStatus, metadata: TrackMetadata) -> Self {
        let state = PlayerState {
            player_name: id.player_name().to_string(),
            playback_status,
            metadata,
        };

        Self {
            id,
            state,
            subscription: None,
        }
    }

    /// Attach the task forwarding this player's change notifications.
    ///
    /// Replaces (and cancels) any previous subscription.
    pub fn subscribe(&mut self, subscription: JoinHandle<()>) {
        if let Some(previous) = self.subscription.replace(subscription) {
            previous.abort();
        }
    }

    /// Player identity
    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    /// Full state snapshot
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Backend name, e.g. `spotify`
    pub fn player_name(&self) -> &str {
        &self.state.player_name
    }

    /// Current playback status
    pub fn playback_status(&self) -> PlaybackStatus {
        self.state.playback_status
    }

    /// Current track artist, empty if unknown
    pub fn artist(&self) -> &str {
        &self.state.metadata.artist
    }

    /// Current track title, empty if unknown
    pub fn title(&self) -> &str {
        &self.state.metadata.title
    }

    /// Current track metadata
    pub fn metadata(&self) -> &TrackMetadata {
        &self.state.metadata
    }

    /// Record a delivered playback status. Returns whether it changed.
    pub fn apply_playback_status(&mut self, status: PlaybackStatus) -> bool {
        let changed = self.state.playback_status != status;
        self.state.playback_status = status;
        changed
    }

    /// Record delivered metadata. Returns whether it changed.
    pub fn apply_metadata(&mut self, metadata: TrackMetadata) -> bool {
        let changed = self.state.metadata != metadata;
        self.state.metadata = metadata;
        changed
    }
}

impl Drop for PlayerHandle {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.abort();
        }
    }
}
