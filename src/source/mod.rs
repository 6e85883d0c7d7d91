//! Where track metadata comes from.

pub mod mpd;
pub mod mpris;

use std::future::Future;
use std::time::Duration;

use crate::cache::Cache;
use crate::config::{Config, PlayerKind};
use crate::error::{Error, Result};
use crate::metadata::TrackMetadata;

pub use self::mpd::MpdSource;
pub use self::mpris::MprisSource;

#[derive(Debug, Clone)]
pub enum MetadataSource {
    Mpd(MpdSource),
    Mpris(MprisSource),
}

impl MetadataSource {
    pub fn from_config(config: &Config) -> Self {
        match &config.player {
            PlayerKind::Mpd => MetadataSource::Mpd(MpdSource::new(config.timeout)),
            PlayerKind::Mpris(name) => MetadataSource::Mpris(MprisSource::new(
                name,
                Cache::new(&config.cache_path),
                config.timeout,
            )),
        }
    }

    /// Query the player once.
    pub fn fetch(&self) -> Result<TrackMetadata> {
        match self {
            MetadataSource::Mpd(source) => source.fetch(),
            MetadataSource::Mpris(source) => source.fetch(),
        }
    }
}

/// Drive one backend query on a single-threaded runtime, giving up after
/// `timeout`.
pub(crate) fn block_on_bounded<T>(
    peer: &str,
    timeout: Duration,
    query: impl Future<Output = Result<T>>,
) -> Result<T> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::SourceUnavailable(format!("could not start runtime: {e}")))?;
    runtime.block_on(async {
        tokio::time::timeout(timeout, query).await.map_err(|_| {
            Error::SourceUnavailable(format!(
                "{peer} did not answer within {} ms",
                timeout.as_millis()
            ))
        })?
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_query_times_out() {
        let err = block_on_bounded(
            "org.mpris.MediaPlayer2.stuck",
            Duration::from_millis(20),
            std::future::pending::<Result<()>>(),
        )
        .unwrap_err();
        match err {
            Error::SourceUnavailable(message) => assert_eq!(
                message,
                "org.mpris.MediaPlayer2.stuck did not answer within 20 ms"
            ),
            other => panic!("expected SourceUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn fast_query_passes_through() {
        let value = block_on_bounded("mpd", Duration::from_secs(1), async { Ok(7) }).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn configured_timeout_reaches_backend() {
        let config = Config {
            timeout: Duration::from_millis(250),
            ..Config::default()
        };
        match MetadataSource::from_config(&config) {
            MetadataSource::Mpris(source) => {
                assert_eq!(source.timeout(), Duration::from_millis(250))
            }
            other => panic!("expected mpris source, got {other:?}"),
        }

        let config = Config {
            player: PlayerKind::Mpd,
            ..config
        };
        match MetadataSource::from_config(&config) {
            MetadataSource::Mpd(source) => {
                assert_eq!(source.timeout(), Duration::from_millis(250))
            }
            other => panic!("expected mpd source, got {other:?}"),
        }
    }

    #[test]
    fn selects_backend_by_player() {
        let config = Config {
            player: PlayerKind::from_name("mpd"),
            ..Config::default()
        };
        assert!(matches!(MetadataSource::from_config(&config), MetadataSource::Mpd(_)));

        let config = Config::default();
        match MetadataSource::from_config(&config) {
            MetadataSource::Mpris(source) => {
                assert_eq!(source.service(), "org.mpris.MediaPlayer2.spotifyd")
            }
            other => panic!("expected mpris source, got {other:?}"),
        }
    }
}
