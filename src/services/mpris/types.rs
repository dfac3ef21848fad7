use std::fmt;

/// Well-known bus name prefix shared by every MPRIS player.
pub const MPRIS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Instance name `playerctld` registers under; it proxies other players
/// and is never a player of its own.
pub const PLAYERCTLD_INSTANCE: &str = "playerctld";

/// Unique identifier for a media player
///
/// Wraps the D-Bus bus name, e.g. `org.mpris.MediaPlayer2.firefox.instance_1_42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a PlayerId from a D-Bus bus name
    pub fn from_bus_name(bus_name: &str) -> Self {
        Self(bus_name.to_string())
    }

    /// Create a PlayerId from either a full bus name or a bare instance
    /// name such as `spotify`.
    pub fn from_name(name: &str) -> Self {
        if name.starts_with(MPRIS_PREFIX) {
            Self::from_bus_name(name)
        } else {
            Self(format!("{MPRIS_PREFIX}{name}"))
        }
    }

    /// Get the D-Bus bus name
    pub fn bus_name(&self) -> &str {
        &self.0
    }

    /// Instance part of the bus name, e.g. `firefox.instance_1_42`
    pub fn instance(&self) -> &str {
        self.0.strip_prefix(MPRIS_PREFIX).unwrap_or(&self.0)
    }

    /// Backend player name, e.g. `firefox`
    ///
    /// This is the instance up to its first `.`.
    pub fn player_name(&self) -> &str {
        let instance = self.instance();
        instance
            .split_once('.')
            .map_or(instance, |(name, _)| name)
    }

    /// Whether this is a real MPRIS player bus name
    pub fn is_player(&self) -> bool {
        self.0.starts_with(MPRIS_PREFIX) && self.instance() != PLAYERCTLD_INSTANCE
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current playback status of a media player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    /// Player is currently playing
    Playing,

    /// Player is paused
    Paused,

    /// Player is stopped
    Stopped,

    /// Player did not report a recognizable status
    #[default]
    Unknown,
}

impl From<&str> for PlaybackStatus {
    fn from(status: &str) -> Self {
        match status {
            "Playing" => Self::Playing,
            "Paused" => Self::Paused,
            "Stopped" => Self::Stopped,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = match self {
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Stopped => "Stopped",
            Self::Unknown => "Unknown",
        };
        f.write_str(status)
    }
}
