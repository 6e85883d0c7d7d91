use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{
    Config, DEFAULT_CACHE_PATH, DEFAULT_FORMAT, DEFAULT_PLAYER, DEFAULT_TIMEOUT_MS,
    DEFAULT_TRUNCLEN, PlayerKind,
};
use crate::error::Error;
use crate::format;
use crate::source::MetadataSource;

#[derive(Parser, Debug)]
#[command(
    name = "polybar-play",
    version,
    about = "Print the current track of an MPRIS player (or mpd) as one status line"
)]
pub struct Cli {
    /// Maximum length of the line, not counting glyph and padding
    #[arg(short, long, value_name = "TRUNCLEN", default_value_t = DEFAULT_TRUNCLEN)]
    trunclen: usize,

    /// Output template using {artist}, {song}, {album} and {play_pause}
    #[arg(short, long, value_name = "FORMAT", default_value = DEFAULT_FORMAT)]
    format: String,

    /// Glyphs for playing, paused and unknown, comma separated
    #[arg(long = "playpause", value_name = "GLYPHS")]
    play_pause: Option<String>,

    /// Index of the polybar font for artist, song and album
    #[arg(long, value_name = "INDEX")]
    font: Option<u32>,

    /// Index of the polybar font for the play/pause glyph
    #[arg(long = "playpause-font", value_name = "INDEX")]
    play_pause_font: Option<u32>,

    /// Print an empty line while the player is paused
    #[arg(short, long)]
    quiet: bool,

    /// MPRIS bus name suffix of the player, or "mpd"
    #[arg(short, long, value_name = "NAME", default_value = DEFAULT_PLAYER)]
    player: String,

    /// Where the last non-empty metadata is kept
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CACHE_PATH)]
    tmpfile: PathBuf,

    /// How long to wait for the player to answer, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout: u64,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let defaults = Config::default();
        Config {
            trunclen: cli.trunclen,
            format: cli.format,
            play_pause: cli.play_pause.unwrap_or(defaults.play_pause),
            font: cli.font,
            play_pause_font: cli.play_pause_font,
            quiet: cli.quiet,
            player: PlayerKind::from_name(&cli.player),
            cache_path: cli.tmpfile,
            timeout: Duration::from_millis(cli.timeout),
        }
    }
}

/// The single stderr line for a failed run: the error and its causes.
pub fn error_line(err: &anyhow::Error) -> String {
    format!("[ERROR] {err:#}")
}

pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<Error>().map_or(1, Error::exit_code)
}

/// Log to stderr so stdout only ever carries the status line.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

pub fn run() -> Result<()> {
    let config = Config::from(Cli::parse());
    debug!(?config, "parsed arguments");

    let track = MetadataSource::from_config(&config).fetch()?;
    debug!(?track, "fetched metadata");

    let line = format::render(&config, &track).map_err(Error::from)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{line}").context("could not write status line")?;
    Ok(())
}
