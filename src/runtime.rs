//! Effect runner for the TUI
//!
//! Carries out the `Effect`s the app queues (fetches and saves) and feeds
//! finished fetches back into the app.

use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, warn};

use crate::api::Catalog;
use crate::app::{App, Effect};
use crate::fetch::{FetchEvent, Fetcher};
use crate::store::WatchedStore;

pub struct Runtime {
    fetcher: Fetcher,
    events: UnboundedReceiver<FetchEvent>,
    store: Option<WatchedStore>,
}

impl Runtime {
    /// `store` of `None` keeps the watched list in memory only
    pub fn new(catalog: Catalog, debounce: std::time::Duration, store: Option<WatchedStore>) -> Self {
        let (fetcher, events) = Fetcher::new(catalog, debounce);
        Self {
            fetcher,
            events,
            store,
        }
    }

    /// Run queued effects, then apply any finished fetches
    ///
    /// Returns true if the app state changed.
    pub fn process(&mut self, app: &mut App) -> bool {
        let mut changed = false;
        for effect in app.take_effects() {
            self.run(effect, app);
            changed = true;
        }

        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    app.apply_fetch(event);
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    error!("fetch channel closed");
                    break;
                }
            }
        }
        changed
    }

    /// Wait for the next finished fetch
    pub async fn next_event(&mut self) -> Option<FetchEvent> {
        self.events.recv().await
    }

    fn run(&mut self, effect: Effect, app: &mut App) {
        match effect {
            Effect::Search { seq, query } => self.fetcher.search(seq, query),
            Effect::CancelSearch => self.fetcher.cancel_search(),
            Effect::FetchDetail { seq, id } => self.fetcher.detail(seq, id),
            Effect::CancelDetail => self.fetcher.cancel_detail(),
            Effect::SaveWatched => {
                if let Some(store) = &self.store {
                    if let Err(e) = store.save(&app.watched.list) {
                        warn!("save failed: {}", e);
                        app.set_error(format!("Could not save watched list: {}", e));
                    }
                }
            }
        }
    }
}
