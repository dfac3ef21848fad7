use tokio::sync::mpsc;

use crate::services::mpris::{PlaybackStatus, PlayerId, TrackMetadata};

/// Everything the aggregator reacts to.
///
/// Discovery, player monitoring, the shift channel and process signals
/// all feed this one type into a single queue.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// A player registered on the bus
    Appeared(PlayerId),

    /// A player left the bus
    Vanished(PlayerId),

    /// A player's playback status changed
    PlaybackChanged {
        /// Player that changed
        player_id: PlayerId,
        /// New status
        status: PlaybackStatus,
    },

    /// A player's track metadata changed
    MetadataChanged {
        /// Player that changed
        player_id: PlayerId,
        /// New metadata
        metadata: TrackMetadata,
    },

    /// Someone asked to re-evaluate the active player
    ShiftRequested,

    /// The process was asked to terminate
    Interrupt,
}

/// Producer side of the aggregator's event queue
pub type EventSender = mpsc::UnboundedSender<MediaEvent>;

/// Consumer side of the aggregator's event queue
pub type EventReceiver = mpsc::UnboundedReceiver<MediaEvent>;

/// Create the aggregator's event queue
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
