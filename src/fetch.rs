//! Background catalog fetches
//!
//! One search task and one detail task may be in flight at a time. Starting a
//! new one aborts the previous task, so a superseded request never completes.
//! Completions travel back to the event loop over a channel, tagged with the
//! sequence number the app assigned; the app drops any completion whose
//! number is no longer current.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use crate::api::{Catalog, CatalogError};
use crate::models::{MovieDetail, SearchResult};

/// A finished fetch
#[derive(Debug)]
pub enum FetchEvent {
    Search {
        seq: u64,
        query: String,
        outcome: Result<Vec<SearchResult>, CatalogError>,
    },
    Detail {
        seq: u64,
        id: String,
        outcome: Result<MovieDetail, CatalogError>,
    },
}

impl FetchEvent {
    pub fn seq(&self) -> u64 {
        match self {
            FetchEvent::Search { seq, .. } | FetchEvent::Detail { seq, .. } => *seq,
        }
    }
}

/// Owner of the in-flight tasks
pub struct Fetcher {
    catalog: Arc<Catalog>,
    debounce: Duration,
    tx: UnboundedSender<FetchEvent>,
    search_task: Option<JoinHandle<()>>,
    detail_task: Option<JoinHandle<()>>,
}

impl Fetcher {
    /// Create a fetcher and the receiver its completions arrive on
    pub fn new(catalog: Catalog, debounce: Duration) -> (Self, UnboundedReceiver<FetchEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let fetcher = Self {
            catalog: Arc::new(catalog),
            debounce,
            tx,
            search_task: None,
            detail_task: None,
        };
        (fetcher, rx)
    }

    /// Start a search, cancelling any search still pending
    ///
    /// The request goes out after the debounce delay; an empty result set is
    /// reported as `CatalogError::NoResults`.
    pub fn search(&mut self, seq: u64, query: String) {
        self.cancel_search();

        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();
        let debounce = self.debounce;

        debug!(seq, query = %query, "search scheduled");
        self.search_task = Some(tokio::spawn(async move {
            if !debounce.is_zero() {
                tokio::time::sleep(debounce).await;
            }
            let outcome = match catalog.search(&query).await {
                Ok(results) if results.is_empty() => Err(CatalogError::NoResults),
                other => other,
            };
            let _ = tx.send(FetchEvent::Search {
                seq,
                query,
                outcome,
            });
        }));
    }

    /// Abort the pending search, if any
    pub fn cancel_search(&mut self) {
        if let Some(task) = self.search_task.take() {
            if !task.is_finished() {
                trace!("search aborted");
            }
            task.abort();
        }
    }

    /// Fetch details for `id`, cancelling any detail fetch still pending
    pub fn detail(&mut self, seq: u64, id: String) {
        self.cancel_detail();

        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();

        debug!(seq, id = %id, "detail requested");
        self.detail_task = Some(tokio::spawn(async move {
            let outcome = catalog.detail(&id).await;
            let _ = tx.send(FetchEvent::Detail { seq, id, outcome });
        }));
    }

    /// Abort the pending detail fetch, if any
    pub fn cancel_detail(&mut self) {
        if let Some(task) = self.detail_task.take() {
            task.abort();
        }
    }

    /// Whether a search task exists and has not finished
    pub fn search_pending(&self) -> bool {
        self.search_task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        self.cancel_search();
        self.cancel_detail();
    }
}
