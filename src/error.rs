use std::path::PathBuf;

use thiserror::Error;

use crate::format::TemplateError;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that end an invocation. Argument errors never get here, clap
/// reports those itself.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    SourceUnavailable(String),

    #[error("could not read cached metadata from {}", path.display())]
    CacheUnavailable {
        path: PathBuf,
        #[source]
        source: CacheErrorKind,
    },

    #[error("could not write cached metadata to {}", path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: CacheErrorKind,
    },

    #[error("invalid format template")]
    Format(#[from] TemplateError),
}

#[derive(Debug, Error)]
pub enum CacheErrorKind {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object")]
    NotAnObject,
}

impl Error {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::SourceUnavailable(_)
            | Error::CacheUnavailable { .. }
            | Error::CacheWrite { .. } => 1,
            Error::Format(_) => 2,
        }
    }
}

impl From<zbus::Error> for Error {
    fn from(err: zbus::Error) -> Self {
        Error::SourceUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_kind() {
        assert_eq!(Error::SourceUnavailable("gone".into()).exit_code(), 1);
        let cache = Error::CacheUnavailable {
            path: PathBuf::from("/nope.json"),
            source: CacheErrorKind::NotAnObject,
        };
        assert_eq!(cache.exit_code(), 1);
        let format = Error::Format(TemplateError::UnknownPlaceholder("genre".into()));
        assert_eq!(format.exit_code(), 2);
    }

    #[test]
    fn cache_error_names_the_path() {
        let err = Error::CacheUnavailable {
            path: PathBuf::from("/tmp/last.json"),
            source: CacheErrorKind::NotAnObject,
        };
        assert_eq!(err.to_string(), "could not read cached metadata from /tmp/last.json");
        let cause = std::error::Error::source(&err).map(|cause| cause.to_string());
        assert_eq!(cause.as_deref(), Some("expected a JSON object"));
    }
}
