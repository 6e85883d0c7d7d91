//! Turns track metadata into the single status line.
//!
//! Templates use `{artist}`, `{song}`, `{album}` and `{play_pause}`; `{{` and
//! `}}` produce literal braces. Anything else in braces is rejected.

use thiserror::Error;

use crate::config::{Config, DEFAULT_PAUSED_GLYPH, DEFAULT_PLAYING_GLYPH, DEFAULT_UNKNOWN_GLYPH};
use crate::metadata::{PlaybackStatus, TrackMetadata};

/// Characters allowed beyond the configured length for the glyph and padding.
pub const TRUNCATION_SLACK: usize = 4;
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder {{{0}}}")]
    UnknownPlaceholder(String),
    #[error("unmatched '{{' at offset {0}")]
    UnclosedBrace(usize),
    #[error("single '}}' at offset {0}")]
    StrayClosingBrace(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Artist,
    Song,
    Album,
    PlayPause,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "artist" => Some(Field::Artist),
            "song" => Some(Field::Song),
            "album" => Some(Field::Album),
            "play_pause" => Some(Field::PlayPause),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed output template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' if chars.peek().map(|&(_, next)| next) == Some('{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek().map(|&(_, next)| next) == Some('}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, c) in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(TemplateError::UnclosedBrace(offset));
                    }
                    let field = Field::from_name(&name)
                        .ok_or(TemplateError::UnknownPlaceholder(name))?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                '}' => return Err(TemplateError::StrayClosingBrace(offset)),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    pub fn substitute(&self, artist: &str, song: &str, album: &str, play_pause: &str) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.as_str(),
                Segment::Field(Field::Artist) => artist,
                Segment::Field(Field::Song) => song,
                Segment::Field(Field::Album) => album,
                Segment::Field(Field::PlayPause) => play_pause,
            })
            .collect()
    }
}

/// Polybar font markup: `%{T<index>}label%{T-}`.
pub fn with_font(index: u32, label: &str) -> String {
    format!("%{{T{index}}}{label}%{{T-}}")
}

/// Choose the glyph for `status` from a comma separated
/// `playing,paused,unknown` list.
pub fn select_glyph(spec: &str, status: &PlaybackStatus) -> String {
    let fields: Vec<&str> = spec.split(',').collect();
    let pick = |index: usize, fallback: &str| {
        fields.get(index).copied().unwrap_or(fallback).to_string()
    };
    match status {
        PlaybackStatus::Playing => pick(0, DEFAULT_PLAYING_GLYPH),
        PlaybackStatus::Paused => pick(1, DEFAULT_PAUSED_GLYPH),
        PlaybackStatus::Unknown => pick(2, DEFAULT_UNKNOWN_GLYPH),
        PlaybackStatus::Other(_) => String::new(),
    }
}

/// Cut `text` to `len` characters and add an ellipsis. If the kept part
/// opens a parenthesis it never closes, a `)` is added after the ellipsis.
pub fn truncate(text: &str, len: usize) -> String {
    if text.chars().count() <= len {
        return text.to_string();
    }
    let mut out: String = text.chars().take(len).collect();
    out.push_str(ELLIPSIS);
    if out.contains('(') && !out.contains(')') {
        out.push(')');
    }
    out
}

/// Build the status line, without the trailing newline. Returns an empty
/// string when output is suppressed.
pub fn render(config: &Config, track: &TrackMetadata) -> Result<String, TemplateError> {
    let mut play_pause = select_glyph(&config.play_pause, &track.status);
    if let Some(index) = config.play_pause_font {
        play_pause = with_font(index, &play_pause);
    }

    if (config.quiet && track.status == PlaybackStatus::Paused) || track.is_empty() {
        return Ok(String::new());
    }

    let template = Template::parse(&config.format)?;
    let line = match config.font {
        Some(index) => template.substitute(
            &with_font(index, &track.artist),
            &with_font(index, &track.song),
            &with_font(index, &track.album),
            &play_pause,
        ),
        None => template.substitute(&track.artist, &track.song, &track.album, &play_pause),
    };
    Ok(truncate(&line, config.trunclen.saturating_add(TRUNCATION_SLACK)))
}
