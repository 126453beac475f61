//! App state and core application logic
//!
//! Holds the search, detail and watched state, maps keys onto them, and
//! queues `Effect`s for the runtime to carry out (network fetches and
//! persistence). Nothing in here performs I/O.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::config::DEFAULT_MIN_QUERY_LEN;
use crate::fetch::FetchEvent;
use crate::models::*;
use crate::watched::WatchedList;

/// Terminal title when no movie is open
pub const APP_TITLE: &str = "usePopcorn";

// =============================================================================
// Input Mode / Focus
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

/// Which box receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    /// Left box: search results
    #[default]
    Results,
    /// Right box: movie detail, or the watched list when nothing is selected
    Watched,
}

impl Pane {
    pub fn toggle(self) -> Self {
        match self {
            Pane::Results => Pane::Watched,
            Pane::Watched => Pane::Results,
        }
    }
}

// =============================================================================
// Loading State
// =============================================================================

/// Loading state for async operations
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Idle - no loading in progress
    #[default]
    Idle,
    /// Loading with optional message
    Loading(Option<String>),
    /// Error with message
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Effects
// =============================================================================

/// Work the runtime must do on the app's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start a (debounced) search, superseding any pending one
    Search { seq: u64, query: String },
    /// Drop the pending search
    CancelSearch,
    /// Fetch details for the selected movie
    FetchDetail { seq: u64, id: String },
    /// Drop the pending detail fetch
    CancelDetail,
    /// Persist the watched list
    SaveWatched,
}

// =============================================================================
// List Selection
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Offset that keeps the selection inside a viewport of `visible_height`
    pub fn visible_offset(&self, visible_height: usize) -> usize {
        if visible_height == 0 || self.selected < self.offset {
            self.selected.min(self.offset)
        } else if self.selected >= self.offset + visible_height {
            self.selected + 1 - visible_height
        } else {
            self.offset
        }
    }

    /// Update length, clamping the selection
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// =============================================================================
// Search State
// =============================================================================

/// Search box and its results
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Search query
    pub query: String,
    /// Cursor position in query (in chars)
    pub cursor: usize,
    /// Latest successful results; kept when a later search fails
    pub results: Vec<SearchResult>,
    /// Results list state
    pub list: ListState,
    /// Loading / error state of the latest search
    pub loading: LoadingState,
    /// Sequence number of the latest search
    pub seq: u64,
}

impl SearchState {
    fn byte_index(&self, char_idx: usize) -> usize {
        self.query
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.query.remove(at);
        true
    }

    /// Delete character at cursor
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.query.remove(at);
        true
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clear query
    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Query split at the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_index(self.cursor))
    }

    /// Set results and update list state
    pub fn set_results(&mut self, results: Vec<SearchResult>) {
        self.list = ListState::new(results.len());
        self.results = results;
        self.loading = LoadingState::Idle;
    }

    /// Get currently highlighted result
    pub fn selected_result(&self) -> Option<&SearchResult> {
        self.results.get(self.list.selected)
    }
}

// =============================================================================
// Detail State
// =============================================================================

/// The selected movie and the rating being composed for it
#[derive(Debug, Clone, Default)]
pub struct DetailState {
    /// Identifier of the selected result
    pub selected_id: Option<String>,
    /// Loaded record
    pub movie: Option<MovieDetail>,
    pub loading: LoadingState,
    /// Star rating chosen so far (0 = none)
    pub user_rating: u8,
    /// How many times the rating was changed
    pub rating_decisions: u32,
    /// Sequence number of the latest detail fetch
    pub seq: u64,
}

impl DetailState {
    pub fn is_open(&self) -> bool {
        self.selected_id.is_some()
    }

    /// Set the rating; every change to a non-zero value counts as a decision
    pub fn set_rating(&mut self, rating: u8) {
        let rating = rating.min(MAX_USER_RATING);
        if rating != self.user_rating && rating > 0 {
            self.rating_decisions += 1;
        }
        self.user_rating = rating;
    }

    fn reset(&mut self) {
        self.selected_id = None;
        self.movie = None;
        self.loading = LoadingState::Idle;
        self.user_rating = 0;
        self.rating_decisions = 0;
    }
}

// =============================================================================
// Watched State
// =============================================================================

/// Watched list plus its cursor
#[derive(Debug, Clone, Default)]
pub struct WatchedState {
    pub list: WatchedList,
    pub cursor: ListState,
}

impl WatchedState {
    pub fn new(list: WatchedList) -> Self {
        let cursor = ListState::new(list.len());
        Self { list, cursor }
    }

    pub fn selected(&self) -> Option<&WatchedMovie> {
        self.list.movies().get(self.cursor.selected)
    }
}

/// Open/closed state of the two boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boxes {
    pub results_open: bool,
    pub watched_open: bool,
}

impl Default for Boxes {
    fn default() -> Self {
        Self {
            results_open: true,
            watched_open: true,
        }
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Box receiving navigation keys
    pub focus: Pane,
    /// Global error message (popup)
    pub error: Option<String>,

    pub search: SearchState,
    pub detail: DetailState,
    pub watched: WatchedState,
    pub boxes: Boxes,

    /// Queries shorter than this clear results
    pub min_query_len: usize,
    effects: Vec<Effect>,
}

impl Default for App {
    fn default() -> Self {
        Self::with_watched(WatchedList::new(), DEFAULT_MIN_QUERY_LEN)
    }
}

impl App {
    /// Create a new App instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an app over a restored watched list
    pub fn with_watched(list: WatchedList, min_query_len: usize) -> Self {
        Self {
            running: true,
            input_mode: InputMode::Normal,
            focus: Pane::Results,
            error: None,
            search: SearchState::default(),
            detail: DetailState::default(),
            watched: WatchedState::new(list),
            boxes: Boxes::default(),
            min_query_len,
            effects: Vec::new(),
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Set error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    /// Drain queued effects
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Terminal title: the open movie, or the app name
    pub fn terminal_title(&self) -> String {
        match self.detail.movie.as_ref() {
            Some(movie) if !movie.title.is_empty() => format!("Movie | {}", movie.title),
            _ => APP_TITLE.to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Focus the search box, optionally clearing it
    pub fn focus_search(&mut self, clear: bool) {
        self.input_mode = InputMode::Editing;
        if clear && !self.search.query.is_empty() {
            self.search.clear();
            self.query_changed();
        }
        self.search.cursor_end();
    }

    /// Replace the query
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.query = query.into();
        self.search.cursor_end();
        self.query_changed();
    }

    /// React to a new query: clear when too short, otherwise search
    pub fn query_changed(&mut self) {
        self.search.seq += 1;

        if self.search.query.chars().count() < self.min_query_len {
            self.search.results.clear();
            self.search.list = ListState::new(0);
            self.search.loading = LoadingState::Idle;
            self.effects.push(Effect::CancelSearch);
            return;
        }

        self.search.loading = LoadingState::Loading(None);
        self.effects.push(Effect::Search {
            seq: self.search.seq,
            query: self.search.query.clone(),
        });
    }

    // -------------------------------------------------------------------------
    // Fetch completions
    // -------------------------------------------------------------------------

    /// Apply a finished fetch; stale completions are dropped
    pub fn apply_fetch(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Search {
                seq,
                query,
                outcome,
            } => {
                if seq != self.search.seq {
                    debug!(seq, current = self.search.seq, "stale search result dropped");
                    return;
                }
                match outcome {
                    Ok(results) => {
                        info!(query = %query, count = results.len(), "search finished");
                        self.search.set_results(results);
                    }
                    Err(e) => {
                        if e.is_network() {
                            warn!(query = %query, "search failed: {:?}", e);
                        }
                        self.search.loading = LoadingState::Error(e.to_string());
                    }
                }
            }
            FetchEvent::Detail { seq, id, outcome } => {
                if seq != self.detail.seq || self.detail.selected_id.as_deref() != Some(&id) {
                    debug!(seq, id = %id, "stale detail dropped");
                    return;
                }
                match outcome {
                    Ok(movie) => {
                        self.detail.movie = Some(movie);
                        self.detail.loading = LoadingState::Idle;
                    }
                    Err(e) => {
                        warn!(id = %id, "detail failed: {:?}", e);
                        self.detail.loading = LoadingState::Error(e.to_string());
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Selection / detail
    // -------------------------------------------------------------------------

    /// Select a movie; selecting the open one again closes it
    pub fn select_movie(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.detail.selected_id.as_deref() == Some(id.as_str()) {
            self.close_movie();
            return;
        }

        self.detail.reset();
        self.detail.seq += 1;
        self.detail.selected_id = Some(id.clone());
        self.detail.loading = LoadingState::Loading(None);
        self.focus = Pane::Watched;
        self.effects.push(Effect::FetchDetail {
            seq: self.detail.seq,
            id,
        });
    }

    /// Toggle the highlighted search result
    pub fn select_highlighted(&mut self) -> bool {
        let Some(id) = self.search.selected_result().map(|r| r.id.clone()) else {
            return false;
        };
        self.select_movie(id);
        true
    }

    /// Close the detail view
    pub fn close_movie(&mut self) {
        if !self.detail.is_open() {
            return;
        }
        self.detail.reset();
        self.detail.seq += 1;
        self.focus = Pane::Results;
        self.effects.push(Effect::CancelDetail);
    }

    /// Whether the selected movie is already in the watched list
    pub fn selected_is_watched(&self) -> bool {
        self.detail
            .selected_id
            .as_deref()
            .is_some_and(|id| self.watched.list.contains(id))
    }

    /// Rating can be changed once details are loaded for an unwatched movie
    pub fn can_rate(&self) -> bool {
        self.detail.movie.is_some() && !self.selected_is_watched()
    }

    pub fn set_user_rating(&mut self, rating: u8) {
        if self.can_rate() && rating > 0 {
            self.detail.set_rating(rating);
        }
    }

    fn nudge_rating(&mut self, up: bool) {
        let current = self.detail.user_rating;
        let next = if up {
            (current + 1).min(MAX_USER_RATING)
        } else {
            current.saturating_sub(1).max(1)
        };
        self.set_user_rating(next);
    }

    /// Add the open movie with the chosen rating, then close it
    pub fn add_watched(&mut self) -> bool {
        if !self.can_rate() || self.detail.user_rating == 0 {
            return false;
        }
        let Some(detail) = self.detail.movie.as_ref() else {
            return false;
        };

        let movie = WatchedMovie::from_detail(
            detail,
            self.detail.user_rating,
            self.detail.rating_decisions,
        );
        let title = movie.title.clone();
        if let Err(e) = self.watched.list.add(movie) {
            self.set_error(e.to_string());
            return false;
        }

        info!(title = %title, rating = self.detail.user_rating, "added to watched");
        self.watched.cursor.set_len(self.watched.list.len());
        self.effects.push(Effect::SaveWatched);
        self.close_movie();
        true
    }

    /// Remove a watched movie by identifier
    pub fn delete_watched(&mut self, id: &str) -> bool {
        match self.watched.list.remove(id) {
            Ok(movie) => {
                info!(title = %movie.title, "removed from watched");
                self.watched.cursor.set_len(self.watched.list.len());
                self.effects.push(Effect::SaveWatched);
                true
            }
            Err(_) => false,
        }
    }

    pub fn toggle_results_box(&mut self) {
        self.boxes.results_open = !self.boxes.results_open;
    }

    pub fn toggle_watched_box(&mut self) {
        self.boxes.watched_open = !self.boxes.watched_open;
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Clear error on any keypress
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.focus = Pane::Results;
                self.close_movie();
                true
            }
            KeyCode::Enter | KeyCode::Down | KeyCode::Tab => {
                self.input_mode = InputMode::Normal;
                self.focus = Pane::Results;
                true
            }
            KeyCode::Char(c) => {
                self.search.insert(c);
                self.query_changed();
                true
            }
            KeyCode::Backspace => {
                if self.search.backspace() {
                    self.query_changed();
                }
                true
            }
            KeyCode::Delete => {
                if self.search.delete() {
                    self.query_changed();
                }
                true
            }
            KeyCode::Left => {
                self.search.cursor_left();
                true
            }
            KeyCode::Right => {
                self.search.cursor_right();
                true
            }
            KeyCode::Home => {
                self.search.cursor_home();
                true
            }
            KeyCode::End => {
                self.search.cursor_end();
                true
            }
            _ => false,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Char('/') => {
                self.focus_search(false);
                return true;
            }
            KeyCode::Enter => {
                // Enter outside the input always starts a fresh search
                self.focus_search(true);
                return true;
            }
            KeyCode::Esc => {
                if self.detail.is_open() {
                    self.close_movie();
                    return true;
                }
                return false;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
                return true;
            }
            KeyCode::Char('[') => {
                self.toggle_results_box();
                return true;
            }
            KeyCode::Char(']') => {
                self.toggle_watched_box();
                return true;
            }
            _ => {}
        }

        match self.focus {
            Pane::Results => self.handle_results_key(key),
            Pane::Watched if self.detail.is_open() => self.handle_detail_key(key),
            Pane::Watched => self.handle_watched_key(key),
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('o') => self.select_highlighted(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.search.list.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.search.list.down();
                true
            }
            KeyCode::PageUp => {
                self.search.list.page_up(10);
                true
            }
            KeyCode::PageDown => {
                self.search.list.page_down(10);
                true
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.search.list.first();
                true
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.search.list.last();
                true
            }
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace | KeyCode::Char('b') => {
                self.close_movie();
                true
            }
            KeyCode::Char(c @ '1'..='9') => {
                self.set_user_rating(c as u8 - b'0');
                true
            }
            KeyCode::Char('0') => {
                self.set_user_rating(MAX_USER_RATING);
                true
            }
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('l') => {
                self.nudge_rating(true);
                true
            }
            KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => {
                self.nudge_rating(false);
                true
            }
            KeyCode::Char('a') => self.add_watched(),
            _ => false,
        }
    }

    fn handle_watched_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.watched.cursor.up();
                true
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.watched.cursor.down();
                true
            }
            KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => {
                match self.watched.selected().map(|m| m.imdb_id.clone()) {
                    Some(id) => self.delete_watched(&id),
                    None => false,
                }
            }
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CatalogError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn result(id: &str, title: &str) -> SearchResult {
        SearchResult {
            id: id.into(),
            title: title.into(),
            year: "2010".into(),
            poster: None,
        }
    }

    fn detail(id: &str) -> MovieDetail {
        MovieDetail {
            id: id.into(),
            title: "Inception".into(),
            year: "2010".into(),
            poster: None,
            runtime: "148 min".into(),
            imdb_rating: "8.8".into(),
            plot: "Dreams within dreams".into(),
            released: "16 Jul 2010".into(),
            actors: "Leonardo DiCaprio".into(),
            director: "Christopher Nolan".into(),
            genre: "Sci-Fi".into(),
        }
    }

    /// App with a loaded detail for `id`
    fn app_with_detail(id: &str) -> App {
        let mut app = App::new();
        app.select_movie(id);
        let seq = app.detail.seq;
        app.apply_fetch(FetchEvent::Detail {
            seq,
            id: id.into(),
            outcome: Ok(detail(id)),
        });
        app.take_effects();
        app
    }

    // -------------------------------------------------------------------------
    // ListState Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_list_state_navigation() {
        let mut list = ListState::new(5);
        list.down();
        list.down();
        list.down();
        list.down();
        list.down();
        assert_eq!(list.selected, 4);

        list.up();
        assert_eq!(list.selected, 3);

        list.first();
        assert_eq!(list.selected, 0);

        list.last();
        assert_eq!(list.selected, 4);
    }

    #[test]
    fn test_list_state_set_len_clamps() {
        let mut list = ListState::new(10);
        list.selected = 8;
        list.set_len(5);
        assert_eq!(list.selected, 4);
        list.set_len(0);
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_visible_offset() {
        let mut list = ListState::new(20);
        list.selected = 12;
        assert_eq!(list.visible_offset(5), 8);
        list.selected = 2;
        assert_eq!(list.visible_offset(5), 0);
    }

    // -------------------------------------------------------------------------
    // SearchState Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_search_state_editing() {
        let mut search = SearchState::default();
        for c in "hello".chars() {
            search.insert(c);
        }
        assert_eq!(search.query, "hello");
        assert_eq!(search.cursor, 5);

        search.cursor_left();
        search.cursor_left();
        search.insert('X');
        assert_eq!(search.query, "helXlo");

        search.backspace();
        assert_eq!(search.query, "hello");

        search.cursor_home();
        assert!(!search.backspace());
        search.delete();
        assert_eq!(search.query, "ello");
    }

    #[test]
    fn test_search_state_multibyte() {
        let mut search = SearchState::default();
        for c in "amélie".chars() {
            search.insert(c);
        }
        search.cursor_left();
        search.cursor_left();
        search.cursor_left();
        assert_eq!(search.split_at_cursor(), ("amé", "lie"));
        search.backspace();
        assert_eq!(search.query, "amlie");
    }

    // -------------------------------------------------------------------------
    // Query Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_short_query_clears_results() {
        let mut app = App::new();
        app.search.set_results(vec![result("tt1", "Inception")]);

        app.set_query("in");
        assert!(app.search.results.is_empty());
        assert_eq!(app.search.loading, LoadingState::Idle);
        assert_eq!(app.take_effects(), vec![Effect::CancelSearch]);
    }

    #[test]
    fn test_query_triggers_search() {
        let mut app = App::new();
        app.set_query("inc");
        assert!(app.search.loading.is_loading());
        assert_eq!(
            app.take_effects(),
            vec![Effect::Search {
                seq: 1,
                query: "inc".into()
            }]
        );
    }

    #[test]
    fn test_latest_query_wins() {
        let mut app = App::new();
        app.set_query("inc");
        let first = app.search.seq;
        app.set_query("incep");
        let second = app.search.seq;

        app.apply_fetch(FetchEvent::Search {
            seq: second,
            query: "incep".into(),
            outcome: Ok(vec![result("tt2", "Inception")]),
        });
        app.apply_fetch(FetchEvent::Search {
            seq: first,
            query: "inc".into(),
            outcome: Ok(vec![result("tt9", "Incendies")]),
        });

        assert_eq!(app.search.results.len(), 1);
        assert_eq!(app.search.results[0].id, "tt2");
    }

    #[test]
    fn test_search_error_keeps_results() {
        let mut app = App::new();
        app.set_query("inception");
        let seq = app.search.seq;
        app.apply_fetch(FetchEvent::Search {
            seq,
            query: "inception".into(),
            outcome: Ok(vec![result("tt1", "Inception")]),
        });

        app.set_query("inceptionxyz");
        let seq = app.search.seq;
        app.apply_fetch(FetchEvent::Search {
            seq,
            query: "inceptionxyz".into(),
            outcome: Err(CatalogError::NoResults),
        });

        assert_eq!(app.search.loading.error(), Some("No results"));
        assert_eq!(app.search.results.len(), 1);
    }

    #[test]
    fn test_typing_searches_through_keys() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Editing);

        for c in "mat".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let effects = app.take_effects();
        assert_eq!(effects.len(), 3);
        assert_eq!(effects[0], Effect::CancelSearch);
        assert_eq!(
            effects[2],
            Effect::Search {
                seq: 3,
                query: "mat".into()
            }
        );

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_enter_without_results_focuses_and_clears() {
        let mut app = App::new();
        app.set_query("ab");
        app.take_effects();

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.search.query, "");
    }

    // -------------------------------------------------------------------------
    // Selection Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_select_toggles_detail() {
        let mut app = App::new();
        app.select_movie("tt1");
        assert_eq!(app.detail.selected_id.as_deref(), Some("tt1"));
        assert!(app.detail.loading.is_loading());

        app.select_movie("tt1");
        assert!(!app.detail.is_open());
        assert_eq!(
            app.take_effects(),
            vec![
                Effect::FetchDetail {
                    seq: 1,
                    id: "tt1".into()
                },
                Effect::CancelDetail
            ]
        );
    }

    #[test]
    fn test_select_other_switches_detail() {
        let mut app = App::new();
        app.select_movie("tt1");
        app.select_movie("tt2");
        assert_eq!(app.detail.selected_id.as_deref(), Some("tt2"));
    }

    #[test]
    fn test_stale_detail_dropped() {
        let mut app = App::new();
        app.select_movie("tt1");
        let old = app.detail.seq;
        app.select_movie("tt2");

        app.apply_fetch(FetchEvent::Detail {
            seq: old,
            id: "tt1".into(),
            outcome: Ok(detail("tt1")),
        });
        assert!(app.detail.movie.is_none());
        assert!(app.detail.loading.is_loading());
    }

    #[test]
    fn test_escape_closes_detail() {
        let mut app = app_with_detail("tt1");
        assert_eq!(app.terminal_title(), "Movie | Inception");

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.detail.is_open());
        assert_eq!(app.terminal_title(), APP_TITLE);
    }

    #[test]
    fn test_space_selects_highlighted_result() {
        let mut app = App::new();
        app.search
            .set_results(vec![result("tt1", "Inception"), result("tt2", "Interstellar")]);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.detail.selected_id.as_deref(), Some("tt2"));
        assert_eq!(app.focus, Pane::Watched);
    }

    #[test]
    fn test_enter_with_results_focuses_and_clears() {
        let mut app = App::new();
        app.set_query("matrix");
        let seq = app.search.seq;
        app.apply_fetch(FetchEvent::Search {
            seq,
            query: "matrix".into(),
            outcome: Ok(vec![result("tt1", "The Matrix")]),
        });
        app.take_effects();

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Editing);
        assert_eq!(app.search.query, "");
        assert!(app.search.results.is_empty());
        assert!(!app.detail.is_open());
        assert_eq!(app.take_effects(), vec![Effect::CancelSearch]);
    }

    #[test]
    fn test_enter_in_detail_focuses_search() {
        let mut app = app_with_detail("tt1");
        app.handle_key(key(KeyCode::Char('8')));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Editing);
        assert!(app.watched.list.is_empty());
    }

    #[test]
    fn test_escape_while_editing_closes_detail() {
        let mut app = app_with_detail("tt1");
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.input_mode, InputMode::Editing);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(!app.detail.is_open());
        assert_eq!(app.terminal_title(), APP_TITLE);
    }

    // -------------------------------------------------------------------------
    // Rating / Watched Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_rating_decisions_counted() {
        let mut app = app_with_detail("tt1");
        app.handle_key(key(KeyCode::Char('7')));
        app.handle_key(key(KeyCode::Char('7')));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.detail.user_rating, 8);
        assert_eq!(app.detail.rating_decisions, 2);
    }

    #[test]
    fn test_rating_ignored_while_loading() {
        let mut app = App::new();
        app.select_movie("tt1");
        app.handle_key(key(KeyCode::Char('5')));
        assert_eq!(app.detail.user_rating, 0);
    }

    #[test]
    fn test_add_requires_rating() {
        let mut app = app_with_detail("tt1");
        assert!(!app.add_watched());

        app.set_user_rating(9);
        assert!(app.add_watched());
        assert!(app.watched.list.contains("tt1"));
        assert!(!app.detail.is_open());
        assert!(app.take_effects().contains(&Effect::SaveWatched));

        let entry = app.watched.list.get("tt1").unwrap();
        assert_eq!(entry.runtime, Some(148));
        assert_eq!(entry.user_rating, 9);
        assert_eq!(entry.count_rating_decisions, 1);
    }

    #[test]
    fn test_watched_movie_cannot_be_rerated() {
        let mut app = app_with_detail("tt1");
        app.set_user_rating(6);
        app.add_watched();

        let mut app2 = App::with_watched(app.watched.list.clone(), 3);
        app2.select_movie("tt1");
        let seq = app2.detail.seq;
        app2.apply_fetch(FetchEvent::Detail {
            seq,
            id: "tt1".into(),
            outcome: Ok(detail("tt1")),
        });
        assert!(app2.selected_is_watched());
        app2.set_user_rating(2);
        assert_eq!(app2.detail.user_rating, 0);
        assert_eq!(app2.watched.list.user_rating("tt1"), Some(6));
    }

    #[test]
    fn test_delete_watched_by_key() {
        let mut app = app_with_detail("tt1");
        app.set_user_rating(8);
        app.add_watched();
        app.take_effects();

        app.focus = Pane::Watched;
        app.handle_key(key(KeyCode::Char('d')));
        assert!(app.watched.list.is_empty());
        assert_eq!(app.take_effects(), vec![Effect::SaveWatched]);
    }

    #[test]
    fn test_toggle_boxes() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('[')));
        assert!(!app.boxes.results_open);
        app.handle_key(key(KeyCode::Char(']')));
        assert!(!app.boxes.watched_open);
        app.handle_key(key(KeyCode::Char('[')));
        assert!(app.boxes.results_open);
    }

    #[test]
    fn test_app_quit_keys() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.running);

        let mut app = App::new();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
