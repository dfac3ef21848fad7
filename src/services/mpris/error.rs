use super::PlayerId;

/// Errors that can occur while talking to MPRIS players
#[derive(thiserror::Error, Debug)]
pub enum MediaError {
    /// Player with the given ID was not found
    #[error("Player {0} not found")]
    PlayerNotFound(PlayerId),

    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    DbusError(#[from] zbus::Error),

    /// Failed to initialize the media service
    #[error("Failed to initialize media service: {0}")]
    InitializationFailed(String),
}
