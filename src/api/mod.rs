//! API clients for the movie catalogs
//!
//! - OMDb: search by title, detail by IMDb ID
//! - TMDB: search by title, detail by TMDB ID
//!
//! `Catalog` picks one of them from configuration.

pub mod catalog;
pub mod omdb;
pub mod tmdb;

pub use catalog::{Catalog, CatalogError};
pub use omdb::OmdbClient;
pub use tmdb::TmdbClient;
