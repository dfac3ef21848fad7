use std::collections::{BTreeMap, HashMap};

use zbus::zvariant::{OwnedValue, Value};

const TITLE_KEY: &str = "xesam:title";
const ARTIST_KEY: &str = "xesam:artist";
const TRACK_ID_KEY: &str = "mpris:trackid";

/// Metadata for the track a player is currently on
///
/// Missing or mistyped fields are left empty rather than rejected;
/// players are free to publish partial metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    /// Track artist(s), joined with `", "`
    pub artist: String,

    /// Track title
    pub title: String,

    /// MPRIS track identifier
    pub track_id: String,

    /// Remaining fields rendered as text, keyed by their MPRIS name
    pub extra: BTreeMap<String, String>,
}

impl TrackMetadata {
    /// Create metadata with an artist and a title
    pub fn new(artist: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the track identifier
    pub fn with_track_id(mut self, track_id: impl Into<String>) -> Self {
        self.track_id = track_id.into();
        self
    }

    /// Look up a field by its MPRIS key
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            TITLE_KEY => Some(self.title.as_str()),
            ARTIST_KEY => Some(self.artist.as_str()),
            TRACK_ID_KEY => Some(self.track_id.as_str()),
            _ => self.extra.get(key).map(String::as_str),
        }
        .filter(|value| !value.is_empty())
    }
}

impl From<HashMap<String, OwnedValue>> for TrackMetadata {
    fn from(metadata: HashMap<String, OwnedValue>) -> Self {
        let mut track = Self::default();

        for (key, value) in metadata {
            let Some(text) = value_to_text(&value) else {
                continue;
            };

            match key.as_str() {
                TITLE_KEY => track.title = text,
                ARTIST_KEY => track.artist = text,
                TRACK_ID_KEY => track.track_id = text,
                _ => {
                    track.extra.insert(key, text);
                }
            }
        }

        track
    }
}

fn value_to_text(value: &Value<'_>) -> Option<String> {
    match value {
        Value::Str(s) => Some(s.as_str().to_string()),
        Value::ObjectPath(path) => Some(path.as_str().to_string()),
        Value::Value(inner) => value_to_text(inner),
        Value::Array(array) => {
            let items: Vec<String> = array.iter().filter_map(value_to_text).collect();
            if items.is_empty() {
                None
            } else {
                Some(items.join(", "))
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::I32(n) => Some(n.to_string()),
        Value::U32(n) => Some(n.to_string()),
        Value::I64(n) => Some(n.to_string()),
        Value::U64(n) => Some(n.to_string()),
        Value::F64(n) => Some(n.to_string()),
        _ => None,
    }
}
