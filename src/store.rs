//! Watched list persistence
//!
//! The list is stored as a JSON array at
//! `~/.local/share/popcorntui/watched.json` (platform data dir) and written
//! back after every change.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::WatchedMovie;
use crate::watched::WatchedList;

/// Store error types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt watched file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode watched list: {0}")]
    Encode(#[from] serde_json::Error),
}

/// JSON file holding the watched list
#[derive(Debug, Clone)]
pub struct WatchedStore {
    path: PathBuf,
}

impl WatchedStore {
    /// Store at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the platform data directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("popcorntui").join("watched.json"))
    }

    /// Store at the default location
    pub fn open_default() -> Result<Self, StoreError> {
        Self::default_path()
            .map(Self::new)
            .ok_or(StoreError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the list; a missing file is an empty list
    pub fn try_load(&self) -> Result<WatchedList, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no watched file yet");
                return Ok(WatchedList::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if text.trim().is_empty() {
            return Ok(WatchedList::new());
        }

        let movies: Vec<WatchedMovie> =
            serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        debug!(count = movies.len(), "loaded watched list");
        Ok(WatchedList::from_movies(movies))
    }

    /// Read the list, falling back to empty on any error
    pub fn load(&self) -> WatchedList {
        self.try_load().unwrap_or_else(|e| {
            warn!("{}; starting with an empty list", e);
            WatchedList::new()
        })
    }

    /// Write the list via a temp file and rename
    pub fn save(&self, list: &WatchedList) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(list.movies())?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(count = list.len(), path = %self.path.display(), "saved watched list");
        Ok(())
    }
}
