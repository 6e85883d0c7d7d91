//! The local music player daemon. Only artist and title are read, the
//! daemon's play state is not consulted.

use std::fmt::Display;
use std::time::Duration;

use mpd_client::Client;
use mpd_client::commands::CurrentSong;
use mpd_client::responses::Song;
use tokio::net::TcpStream;
use tracing::debug;

use super::block_on_bounded;
use crate::error::{Error, Result};
use crate::metadata::{PlaybackStatus, TrackMetadata};

pub const MPD_ADDRESS: &str = "localhost:6600";

#[derive(Debug, Clone)]
pub struct MpdSource {
    address: String,
    timeout: Duration,
}

impl MpdSource {
    pub fn new(timeout: Duration) -> Self {
        Self {
            address: MPD_ADDRESS.to_string(),
            timeout,
        }
    }

    pub fn fetch(&self) -> Result<TrackMetadata> {
        let peer = format!("mpd at {}", self.address);
        let song = block_on_bounded(&peer, self.timeout, self.current_song())?;
        Ok(song_to_track(song.as_ref()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn current_song(&self) -> Result<Option<Song>> {
        let connection = TcpStream::connect(&self.address)
            .await
            .map_err(|e| self.unavailable(e))?;
        let (client, _events) = Client::connect(connection)
            .await
            .map_err(|e| self.unavailable(e))?;
        debug!(address = %self.address, "requesting current song");
        let current = client
            .command(CurrentSong)
            .await
            .map_err(|e| self.unavailable(e))?;
        Ok(current.map(|in_queue| in_queue.song))
    }

    fn unavailable(&self, err: impl Display) -> Error {
        Error::SourceUnavailable(format!("mpd at {}: {err}", self.address))
    }
}

fn song_to_track(song: Option<&Song>) -> TrackMetadata {
    TrackMetadata {
        status: PlaybackStatus::Other(String::new()),
        artist: song
            .and_then(|s| s.artists().first().cloned())
            .unwrap_or_default(),
        song: song
            .and_then(|s| s.title())
            .map(str::to_string)
            .unwrap_or_default(),
        album: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_queued_is_empty() {
        let track = song_to_track(None);
        assert!(track.is_empty());
        assert_eq!(track.status, PlaybackStatus::Other(String::new()));
    }

    #[test]
    fn unreachable_daemon_is_source_unavailable() {
        let source = MpdSource {
            // reserved port, nothing listens there
            address: "127.0.0.1:1".to_string(),
            timeout: Duration::from_secs(2),
        };
        assert!(matches!(source.fetch(), Err(Error::SourceUnavailable(_))));
    }
}
