use crate::{
    aggregator::PlayerState,
    config::OutputConfig,
    services::mpris::PlaybackStatus,
};

const SPOTIFY: &str = "spotify";
const AD_MARKER: &str = ":ad:";

/// Text shown while Spotify plays an advertisement.
pub const AD_TEXT: &str = "AD PLAYING";

/// Maps a player's state to its status text.
///
/// The rules, in order:
/// 1. Spotify with an advertisement track id shows [`AD_TEXT`].
/// 2. Artist and title show as `"{artist} - {title}"`.
/// 3. Otherwise the title or artist alone, if the matching fallback is
///    enabled, else no text.
///
/// Any text is prefixed with a single space unless the player is playing,
/// so the bar can pick a "paused" glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formatter {
    title_fallback: bool,
    artist_fallback: bool,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            title_fallback: true,
            artist_fallback: false,
        }
    }
}

impl Formatter {
    /// Create a formatter with explicit fallbacks
    pub fn new(title_fallback: bool, artist_fallback: bool) -> Self {
        Self {
            title_fallback,
            artist_fallback,
        }
    }

    /// Format a player's state, `None` when there is nothing to show
    pub fn format(&self, state: &PlayerState) -> Option<String> {
        let metadata = &state.metadata;

        let text = if state.player_name == SPOTIFY && metadata.track_id.contains(AD_MARKER) {
            AD_TEXT.to_string()
        } else {
            match (metadata.artist.as_str(), metadata.title.as_str()) {
                (artist, title) if !artist.is_empty() && !title.is_empty() => {
                    format!("{artist} - {title}")
                }
                ("", title) if !title.is_empty() && self.title_fallback => title.to_string(),
                (artist, "") if !artist.is_empty() && self.artist_fallback => artist.to_string(),
                _ => return None,
            }
        };

        if state.playback_status == PlaybackStatus::Playing {
            Some(text)
        } else {
            Some(format!(" {text}"))
        }
    }
}

impl From<&OutputConfig> for Formatter {
    fn from(config: &OutputConfig) -> Self {
        Self::new(config.title_fallback, config.artist_fallback)
    }
}
