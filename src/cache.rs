use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{CacheErrorKind, Error, Result};

/// Single-slot snapshot of the last non-empty metadata payload.
#[derive(Debug, Clone)]
pub struct Cache {
    path: PathBuf,
}

impl Cache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the snapshot back. A missing file is an error, not an empty map.
    pub fn load(&self) -> Result<Map<String, Value>> {
        let unavailable = |source: CacheErrorKind| Error::CacheUnavailable {
            path: self.path.clone(),
            source,
        };
        let text = fs::read_to_string(&self.path).map_err(|e| unavailable(e.into()))?;
        match serde_json::from_str::<Value>(&text).map_err(|e| unavailable(e.into()))? {
            Value::Object(map) => {
                debug!(path = %self.path.display(), keys = map.len(), "loaded cached metadata");
                Ok(map)
            }
            _ => Err(unavailable(CacheErrorKind::NotAnObject)),
        }
    }

    /// Overwrite the snapshot. Goes through a temp file in the same directory
    /// so readers never see a partial write.
    pub fn store(&self, payload: &Map<String, Value>) -> Result<()> {
        let failed = |source: CacheErrorKind| Error::CacheWrite {
            path: self.path.clone(),
            source,
        };
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| failed(e.into()))?;
        serde_json::to_writer(&mut tmp, payload).map_err(|e| failed(e.into()))?;
        tmp.flush().map_err(|e| failed(e.into()))?;
        tmp.persist(&self.path)
            .map_err(|e| failed(CacheErrorKind::Io(e.error)))?;
        debug!(path = %self.path.display(), "stored metadata snapshot");
        Ok(())
    }

    /// Pick the payload to display: a non-empty fresh payload is stored and
    /// returned, an empty one is replaced by the snapshot.
    ///
    /// A failed store is logged and otherwise ignored.
    pub fn resolve(&self, fresh: Map<String, Value>) -> Result<Map<String, Value>> {
        if fresh.is_empty() {
            debug!("player returned no metadata, using cached snapshot");
            return self.load();
        }
        if let Err(err) = self.store(&fresh) {
            match std::error::Error::source(&err) {
                Some(cause) => warn!("{err}: {cause}"),
                None => warn!("{err}"),
            }
        }
        Ok(fresh)
    }
}
