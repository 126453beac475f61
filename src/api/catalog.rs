//! Provider-independent catalog access

use thiserror::Error;

use crate::api::{OmdbClient, TmdbClient};
use crate::config::Config;
use crate::models::{MovieDetail, Provider, SearchResult};

/// Catalog error types
///
/// `Display` is the notification text shown to the user.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to fetch movies")]
    Status(u16),

    #[error("Failed to fetch movies")]
    Network(#[from] reqwest::Error),

    #[error("No results")]
    NoResults,

    #[error("Movie not found")]
    NotFound,

    /// Error text reported by the catalog itself
    #[error("{0}")]
    Api(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CatalogError {
    /// Whether the failure is on the network path (vs. "nothing matched")
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            CatalogError::Status(_) | CatalogError::Network(_) | CatalogError::InvalidResponse(_)
        )
    }
}

/// The configured catalog
#[derive(Debug, Clone)]
pub enum Catalog {
    Omdb(OmdbClient),
    Tmdb(TmdbClient),
}

impl Catalog {
    /// Build the client for `provider` with keys from `config`
    pub fn from_config(config: &Config, provider: Provider) -> Self {
        match provider {
            Provider::Omdb => Catalog::Omdb(OmdbClient::new(config.omdb_api_key())),
            Provider::Tmdb => Catalog::Tmdb(TmdbClient::new(config.tmdb_api_key())),
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            Catalog::Omdb(_) => Provider::Omdb,
            Catalog::Tmdb(_) => Provider::Tmdb,
        }
    }

    /// Search by title; an empty Vec means nothing matched
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError> {
        match self {
            Catalog::Omdb(client) => client.search(query).await,
            Catalog::Tmdb(client) => client.search(query).await,
        }
    }

    /// Extended record for an identifier returned by `search`
    pub async fn detail(&self, id: &str) -> Result<MovieDetail, CatalogError> {
        match self {
            Catalog::Omdb(client) => client.detail(id).await,
            Catalog::Tmdb(client) => client.detail(id).await,
        }
    }
}
