//! OMDb (The Open Movie Database) API client
//!
//! Search: `/?apikey=K&s=<title>`, detail: `/?apikey=K&i=<imdb id>`.
//! API docs: https://www.omdbapi.com/
//!
//! OMDb answers HTTP 200 even for failures and signals them with
//! `"Response": "False"` plus an `"Error"` string.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::api::CatalogError;
use crate::models::{MovieDetail, SearchResult};

const NOT_FOUND: &str = "Movie not found!";

/// OMDb API client
#[derive(Debug, Clone)]
pub struct OmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OmdbClient {
    /// Create a new OMDb client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, "https://www.omdbapi.com")
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

    async fn get<T: DeserializeOwned>(&self, param: &str, value: &str) -> Result<T, CatalogError> {
        let url = format!(
            "{}/?apikey={}&{}={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            param,
            urlencoding::encode(value)
        );
        debug!(param, value, "omdb request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| CatalogError::InvalidResponse(format!("JSON parse error: {}", e)))
    }

    /// Search movies by title
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError> {
        let response: SearchResponse = self.get("s", query).await?;

        if !response.ok() {
            return match response.error.as_deref() {
                None | Some(NOT_FOUND) => Ok(Vec::new()),
                Some(msg) => Err(CatalogError::Api(msg.to_string())),
            };
        }

        Ok(response
            .search
            .into_iter()
            .map(SearchItemRaw::into_search_result)
            .collect())
    }

    /// Get movie details by IMDb ID
    pub async fn detail(&self, imdb_id: &str) -> Result<MovieDetail, CatalogError> {
        let raw: DetailRaw = self.get("i", imdb_id).await?;

        if raw.response.as_deref() != Some("True") {
            return Err(match raw.error {
                Some(msg) if msg != NOT_FOUND && !msg.starts_with("Incorrect IMDb ID") => {
                    CatalogError::Api(msg)
                }
                _ => CatalogError::NotFound,
            });
        }

        Ok(raw.into_detail(imdb_id))
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<SearchItemRaw>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl SearchResponse {
    fn ok(&self) -> bool {
        self.response == "True"
    }
}

#[derive(Debug, Deserialize)]
struct SearchItemRaw {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

impl SearchItemRaw {
    fn into_search_result(self) -> SearchResult {
        SearchResult {
            id: self.imdb_id,
            title: self.title,
            year: self.year,
            poster: poster_url(self.poster),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct DetailRaw {
    title: String,
    year: String,
    poster: Option<String>,
    runtime: String,
    #[serde(rename = "imdbRating")]
    imdb_rating: String,
    plot: String,
    released: String,
    actors: String,
    director: String,
    genre: String,
    response: Option<String>,
    error: Option<String>,
}

impl DetailRaw {
    fn into_detail(self, id: &str) -> MovieDetail {
        MovieDetail {
            id: id.to_string(),
            title: self.title,
            year: self.year,
            poster: poster_url(self.poster),
            runtime: self.runtime,
            imdb_rating: self.imdb_rating,
            plot: self.plot,
            released: self.released,
            actors: self.actors,
            director: self.director,
            genre: self.genre,
        }
    }
}

/// OMDb uses the literal "N/A" for missing posters
fn poster_url(poster: Option<String>) -> Option<String> {
    poster.filter(|p| !p.is_empty() && p != "N/A")
}
