//! Data structures shared across PopcornTUI
//!
//! Organized by domain:
//! - **Catalog**: search results and movie details from OMDb / TMDB
//! - **Watched**: locally persisted, user-rated movies

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Catalog Provider
// =============================================================================

/// Which remote catalog backs search and detail lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// The Open Movie Database (omdbapi.com)
    #[default]
    Omdb,
    /// The Movie Database (themoviedb.org)
    Tmdb,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Omdb => write!(f, "OMDb"),
            Provider::Tmdb => write!(f, "TMDB"),
        }
    }
}

// =============================================================================
// Catalog Models
// =============================================================================

/// A single search hit: identifier, title, year and poster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    /// Year as the catalog reports it ("2010", "2012–2015", or empty)
    pub year: String,
    pub poster: Option<String>,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{} ({})", self.title, self.year)
        }
    }
}

/// Extended record for the selected movie
///
/// Text fields are kept as the catalog reports them; `runtime_minutes` and
/// `rating_value` turn them into numbers when a movie is added to the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
    /// e.g. "148 min"
    pub runtime: String,
    /// e.g. "8.8" or "N/A"
    pub imdb_rating: String,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetail {
    /// Runtime in minutes, from the first token of the runtime text
    pub fn runtime_minutes(&self) -> Option<u32> {
        parse_runtime(&self.runtime)
    }

    /// Remote rating as a number, `None` for "N/A" and friends
    pub fn rating_value(&self) -> Option<f32> {
        self.imdb_rating.trim().parse::<f32>().ok().filter(|r| r.is_finite())
    }
}

impl fmt::Display for MovieDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} - ⭐ {}",
            self.title, self.year, self.runtime, self.imdb_rating
        )
    }
}

/// Parse "148 min" style runtimes: the first whitespace-separated token
pub fn parse_runtime(text: &str) -> Option<u32> {
    text.split_whitespace().next()?.parse().ok()
}

// =============================================================================
// Watched Models
// =============================================================================

/// Highest star a user can give
pub const MAX_USER_RATING: u8 = 10;

/// A movie the user has watched and rated
///
/// Field names on disk are camelCase (`imdbID`, `userRating`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedMovie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
    pub imdb_rating: Option<f32>,
    pub runtime: Option<u32>,
    pub user_rating: u8,
    #[serde(default)]
    pub count_rating_decisions: u32,
}

impl WatchedMovie {
    /// Build a watched entry from a loaded detail record
    pub fn from_detail(detail: &MovieDetail, user_rating: u8, decisions: u32) -> Self {
        Self {
            imdb_id: detail.id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster: detail.poster.clone(),
            imdb_rating: detail.rating_value(),
            runtime: detail.runtime_minutes(),
            user_rating,
            count_rating_decisions: decisions,
        }
    }
}

impl fmt::Display for WatchedMovie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - 🌟 {}", self.title, self.user_rating)
    }
}

/// Derived statistics over the watched list
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}
