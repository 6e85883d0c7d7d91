//! Typed track metadata, parsed from the loosely typed MPRIS payload.

use serde_json::{Map, Value};

pub const ARTIST_KEY: &str = "xesam:artist";
pub const TITLE_KEY: &str = "xesam:title";
pub const ALBUM_KEY: &str = "xesam:album";

/// Status string reported when the player leaves `PlaybackStatus` empty.
pub const FALLBACK_STATUS: &str = "unknown";

/// Literal that selects the third glyph. Kept misspelled for compatibility
/// with existing setups, so a player reporting "unknown" renders no glyph.
pub const UNKNOWN_STATUS_LITERAL: &str = "unkwnown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Unknown,
    Other(String),
}

impl PlaybackStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Playing" => PlaybackStatus::Playing,
            "Paused" => PlaybackStatus::Paused,
            UNKNOWN_STATUS_LITERAL => PlaybackStatus::Unknown,
            other => PlaybackStatus::Other(other.to_string()),
        }
    }

    /// Like [`parse`](Self::parse), but an absent or empty status counts as
    /// [`FALLBACK_STATUS`].
    pub fn from_bus(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if !s.is_empty() => Self::parse(s),
            _ => Self::parse(FALLBACK_STATUS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub status: PlaybackStatus,
    pub artist: String,
    pub song: String,
    pub album: String,
}

impl TrackMetadata {
    /// Pull the three display fields out of a metadata mapping. Missing keys
    /// become empty strings.
    pub fn from_payload(payload: &Map<String, Value>, status: PlaybackStatus) -> Self {
        Self {
            status,
            artist: payload.get(ARTIST_KEY).map(first_artist).unwrap_or_default(),
            song: payload.get(TITLE_KEY).map(stringify).unwrap_or_default(),
            album: payload.get(ALBUM_KEY).map(stringify).unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.artist.is_empty() && self.song.is_empty() && self.album.is_empty()
    }
}

// Players are supposed to send a list, some send a plain string.
fn first_artist(value: &Value) -> String {
    match value {
        Value::Array(items) => items.first().map(stringify).unwrap_or_default(),
        other => stringify(other),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
