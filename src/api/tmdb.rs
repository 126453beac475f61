//! TMDB (The Movie Database) API client
//!
//! Search and metadata for movies, mapped onto the same records OMDb yields.
//! API docs: https://developer.themoviedb.org/docs

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::api::CatalogError;
use crate::models::{MovieDetail, SearchResult};

const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w300";

/// How many cast members make it into `actors`
const TOP_BILLED: usize = 4;

/// TMDB API client
#[derive(Debug, Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, "https://api.themoviedb.org/3")
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// GET `endpoint` (which already carries its own query string)
    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, CatalogError> {
        let url = format!(
            "{}{}&api_key={}",
            self.base_url,
            endpoint,
            urlencoding::encode(&self.api_key)
        );
        debug!(endpoint, "tmdb request");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| CatalogError::InvalidResponse(format!("JSON parse error: {}", e)))
            }
            status => Err(CatalogError::Status(status.as_u16())),
        }
    }

    /// Search movies by title
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError> {
        let endpoint = format!("/search/movie?query={}&page=1", urlencoding::encode(query));
        let response: SearchResponse = self.get(&endpoint).await?;
        Ok(response
            .results
            .into_iter()
            .map(SearchResultRaw::into_search_result)
            .collect())
    }

    /// Get movie details (with credits) by TMDB ID
    pub async fn detail(&self, id: &str) -> Result<MovieDetail, CatalogError> {
        let id: u64 = id.trim().parse().map_err(|_| CatalogError::NotFound)?;
        let endpoint = format!("/movie/{}?append_to_response=credits", id);
        let response: MovieResponse = match self.get(&endpoint).await {
            Err(CatalogError::Status(404)) => return Err(CatalogError::NotFound),
            other => other?,
        };
        Ok(response.into_detail())
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResultRaw>,
}

#[derive(Debug, Deserialize)]
struct SearchResultRaw {
    id: u64,
    title: String,
    release_date: Option<String>,
    poster_path: Option<String>,
}

impl SearchResultRaw {
    fn into_search_result(self) -> SearchResult {
        SearchResult {
            id: self.id.to_string(),
            title: self.title,
            year: self
                .release_date
                .as_deref()
                .and_then(extract_year)
                .unwrap_or_default(),
            poster: self.poster_path.map(|p| format!("{}{}", POSTER_BASE, p)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct MovieResponse {
    id: u64,
    title: String,
    release_date: Option<String>,
    runtime: Option<u32>,
    #[serde(default)]
    genres: Vec<GenreRaw>,
    overview: Option<String>,
    vote_average: Option<f32>,
    poster_path: Option<String>,
    credits: Option<CreditsRaw>,
}

impl MovieResponse {
    fn into_detail(self) -> MovieDetail {
        let credits = self.credits.unwrap_or_default();
        let actors = credits
            .cast
            .iter()
            .take(TOP_BILLED)
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let director = credits
            .crew
            .iter()
            .filter(|c| c.job.as_deref() == Some("Director"))
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let release_date = self.release_date.unwrap_or_default();

        MovieDetail {
            id: self.id.to_string(),
            title: self.title,
            year: extract_year(&release_date).unwrap_or_default(),
            poster: self.poster_path.map(|p| format!("{}{}", POSTER_BASE, p)),
            runtime: self
                .runtime
                .map(|m| format!("{} min", m))
                .unwrap_or_else(|| "N/A".to_string()),
            imdb_rating: self
                .vote_average
                .map(|v| format!("{:.1}", v))
                .unwrap_or_else(|| "N/A".to_string()),
            plot: self.overview.unwrap_or_default(),
            released: release_date,
            actors,
            director,
            genre: self
                .genres
                .into_iter()
                .map(|g| g.name)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenreRaw {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct CreditsRaw {
    #[serde(default)]
    cast: Vec<PersonRaw>,
    #[serde(default)]
    crew: Vec<PersonRaw>,
}

#[derive(Debug, Deserialize)]
struct PersonRaw {
    name: String,
    job: Option<String>,
}

/// Extract year from a date string like "2022-03-04"
fn extract_year(date: &str) -> Option<String> {
    let year = date.get(..4)?;
    year.chars().all(|c| c.is_ascii_digit()).then(|| year.to_string())
}
