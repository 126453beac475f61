//! Configuration management for PopcornTUI
//!
//! Handles config file loading and API key resolution.
//! Config is stored at ~/.config/popcorntui/config.toml

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::models::Provider;

/// Bundled OMDb key (free tier)
const DEFAULT_OMDB_KEY: &str = "60619ec4";

/// Bundled TMDB v3 key
const DEFAULT_TMDB_KEY: &str = "5c402c0dc3948c9f593c5ad0adcaf317";

/// Searches shorter than this (in characters) clear results instead of fetching
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// Quiet period after the last keystroke before a search is sent
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog used for search and details
    pub provider: Provider,
    /// OMDb API key (falls back to OMDB_API_KEY, then the bundled key)
    pub omdb_api_key: Option<String>,
    /// TMDB API key (falls back to TMDB_API_KEY, then the bundled key)
    pub tmdb_api_key: Option<String>,
    /// Search debounce in milliseconds
    pub debounce_ms: Option<u64>,
    /// Minimum query length that triggers a search
    pub min_query_len: Option<usize>,
    /// Where the watched list lives (default: platform data dir)
    pub watched_path: Option<PathBuf>,
}

impl Config {
    /// Get config file path (~/.config/popcorntui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("popcorntui").join("config.toml"))
    }

    /// Load config from the default path, or defaults if absent/unreadable
    pub fn load() -> Self {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load config from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text).unwrap_or_else(|e| {
                warn!(path = %path.display(), "ignoring config: {:#}", e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Parse TOML text
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("invalid config TOML")
    }

    /// OMDb key: env var, then config, then bundled
    pub fn omdb_api_key(&self) -> String {
        resolve_key("OMDB_API_KEY", self.omdb_api_key.as_deref(), DEFAULT_OMDB_KEY)
    }

    /// TMDB key: env var, then config, then bundled
    pub fn tmdb_api_key(&self) -> String {
        resolve_key("TMDB_API_KEY", self.tmdb_api_key.as_deref(), DEFAULT_TMDB_KEY)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS))
    }

    pub fn min_query_len(&self) -> usize {
        self.min_query_len.unwrap_or(DEFAULT_MIN_QUERY_LEN)
    }
}

fn resolve_key(env_var: &str, configured: Option<&str>, bundled: &str) -> String {
    if let Ok(key) = std::env::var(env_var) {
        if !key.trim().is_empty() {
            return key;
        }
    }
    configured
        .filter(|k| !k.trim().is_empty())
        .unwrap_or(bundled)
        .to_string()
}
