//! Now-playing status line for polybar.
//!
//! One invocation parses the command line, asks the player for its metadata
//! once (over the session bus, or from mpd), and prints a single line.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod metadata;
pub mod source;

pub use config::{Config, PlayerKind};
pub use error::{Error, Result};
pub use metadata::{PlaybackStatus, TrackMetadata};
