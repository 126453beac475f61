//! Watched list and its summary statistics

use thiserror::Error;

use crate::models::{WatchedMovie, WatchedSummary};

/// Watched list errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WatchedError {
    #[error("Already in your list: {0}")]
    AlreadyWatched(String),

    #[error("Not in your list: {0}")]
    NotWatched(String),
}

/// Ordered list of watched movies, unique by identifier
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchedList {
    movies: Vec<WatchedMovie>,
}

impl WatchedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, dropping later duplicates
    pub fn from_movies(movies: Vec<WatchedMovie>) -> Self {
        let mut list = Self::new();
        for movie in movies {
            if !list.contains(&movie.imdb_id) {
                list.movies.push(movie);
            }
        }
        list
    }

    /// Append a movie
    pub fn add(&mut self, movie: WatchedMovie) -> Result<(), WatchedError> {
        if self.contains(&movie.imdb_id) {
            return Err(WatchedError::AlreadyWatched(movie.imdb_id));
        }
        self.movies.push(movie);
        Ok(())
    }

    /// Remove the entry with this identifier
    pub fn remove(&mut self, id: &str) -> Result<WatchedMovie, WatchedError> {
        let idx = self
            .movies
            .iter()
            .position(|m| m.imdb_id == id)
            .ok_or_else(|| WatchedError::NotWatched(id.to_string()))?;
        Ok(self.movies.remove(idx))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.movies.iter().any(|m| m.imdb_id == id)
    }

    pub fn get(&self, id: &str) -> Option<&WatchedMovie> {
        self.movies.iter().find(|m| m.imdb_id == id)
    }

    /// The user's rating for a watched movie
    pub fn user_rating(&self, id: &str) -> Option<u8> {
        self.get(id).map(|m| m.user_rating)
    }

    pub fn movies(&self) -> &[WatchedMovie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Count and averages; an empty list summarizes to zeros
    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary {
            count: self.movies.len(),
            avg_imdb_rating: average(self.movies.iter().filter_map(|m| m.imdb_rating.map(f64::from))),
            avg_user_rating: average(self.movies.iter().map(|m| f64::from(m.user_rating))),
            avg_runtime: average(self.movies.iter().filter_map(|m| m.runtime.map(f64::from))),
        }
    }
}

/// Arithmetic mean, 0 for no values
pub fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}
