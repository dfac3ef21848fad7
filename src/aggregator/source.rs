use async_trait::async_trait;

use super::PlayerHandle;
use crate::services::mpris::{MediaError, PlayerId};

/// Where players come from.
///
/// Implementations announce players by pushing [`MediaEvent::Appeared`]
/// and [`MediaEvent::Vanished`] into the aggregator's queue; the
/// aggregator then calls back into the source to read and subscribe.
///
/// [`MediaEvent::Appeared`]: super::MediaEvent::Appeared
/// [`MediaEvent::Vanished`]: super::MediaEvent::Vanished
#[async_trait]
pub trait PlayerSource: Send + Sync {
    /// Known players, most recently active first.
    ///
    /// Always a fresh query: the ordering can change without any event
    /// reaching the aggregator.
    async fn priority_order(&self) -> Vec<PlayerId>;

    /// Read a player's current state and start forwarding its playback
    /// and metadata changes into the event queue.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if the player cannot be reached, e.g. because
    /// it vanished before it could be read.
    async fn attach(&self, player_id: &PlayerId) -> Result<PlayerHandle, MediaError>;
}
