#![allow(missing_docs)]

use std::collections::HashMap;
use zbus::{Result, proxy};

/// MPRIS MediaPlayer2.Player interface proxy
///
/// Only the properties the status line reads are declared.
#[proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_service = "org.mpris.MediaPlayer2",
    default_path = "/org/mpris/MediaPlayer2"
)]
pub trait MediaPlayer2Player {
    /// Current playback status (Playing, Paused, Stopped)
    #[zbus(property)]
    fn playback_status(&self) -> Result<String>;

    /// Current track metadata
    #[zbus(property)]
    fn metadata(&self) -> Result<HashMap<String, zbus::zvariant::OwnedValue>>;
}

/// playerctld daemon interface proxy
///
/// playerctld keeps its own most-recently-active ordering of players and
/// reorders it on `playerctld shift`.
#[proxy(
    interface = "com.github.altdesktop.playerctld",
    default_service = "org.mpris.MediaPlayer2.playerctld",
    default_path = "/org/mpris/MediaPlayer2"
)]
pub trait Playerctld {
    /// Bus names of known players, most recently active first
    #[zbus(property)]
    fn player_names(&self) -> Result<Vec<String>>;
}
