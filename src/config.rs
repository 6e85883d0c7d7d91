use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TRUNCLEN: usize = 35;
pub const DEFAULT_FORMAT: &str = "{play_pause} {artist}: {song}";
pub const DEFAULT_PLAYING_GLYPH: &str = "\u{f04b}";
pub const DEFAULT_PAUSED_GLYPH: &str = "\u{f04c}";
pub const DEFAULT_UNKNOWN_GLYPH: &str = "?";
pub const DEFAULT_PLAYER: &str = "spotifyd";
pub const DEFAULT_CACHE_PATH: &str = "/tmp/polybar-play-lastplayed.json";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Which backend answers the metadata query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerKind {
    Mpd,
    /// Suffix appended to `org.mpris.MediaPlayer2.`.
    Mpris(String),
}

impl PlayerKind {
    pub fn from_name(name: &str) -> Self {
        if name == "mpd" {
            PlayerKind::Mpd
        } else {
            PlayerKind::Mpris(name.to_string())
        }
    }
}

/// Everything one invocation needs, fixed once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub trunclen: usize,
    pub format: String,
    /// Comma separated: playing, paused, unknown.
    pub play_pause: String,
    pub font: Option<u32>,
    pub play_pause_font: Option<u32>,
    pub quiet: bool,
    pub player: PlayerKind,
    pub cache_path: PathBuf,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trunclen: DEFAULT_TRUNCLEN,
            format: DEFAULT_FORMAT.to_string(),
            play_pause: format!(
                "{DEFAULT_PLAYING_GLYPH},{DEFAULT_PAUSED_GLYPH},{DEFAULT_UNKNOWN_GLYPH}"
            ),
            font: None,
            play_pause_font: None,
            quiet: false,
            player: PlayerKind::from_name(DEFAULT_PLAYER),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}
