//! PopcornTUI - search movies and keep a rated watched list
//!
//! Type a title, pick a result to read its details, rate it and add it to a
//! watched list that lives on disk between runs.
//!
//! # Modules
//!
//! - `models` - Search results, movie details, watched entries
//! - `api` - Catalog clients (OMDb, TMDB)
//! - `fetch` - Debounced, cancellable background fetches
//! - `watched` / `store` - Watched list and its JSON file
//! - `app` - Application state and key handling
//! - `runtime` - Runs the effects the app queues
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod runtime;
pub mod store;
pub mod ui;
pub mod watched;

// Re-export commonly used types
pub use models::{MovieDetail, Provider, SearchResult, WatchedMovie, WatchedSummary};

pub use api::{Catalog, CatalogError, OmdbClient, TmdbClient};
pub use app::{App, Effect};
pub use config::Config;
pub use fetch::{FetchEvent, Fetcher};
pub use store::WatchedStore;
pub use watched::WatchedList;
