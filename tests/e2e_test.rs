//! End-to-end flow: type a query, pick a result, rate it, persist it
//!
//! Drives `App` through key events and lets `Runtime` talk to a mock
//! catalog and a throwaway watched file.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mockito::{Matcher, Server};
use popcorntui::api::{Catalog, OmdbClient};
use popcorntui::app::{App, InputMode, Pane, APP_TITLE};
use popcorntui::runtime::Runtime;
use popcorntui::store::WatchedStore;
use popcorntui::watched::WatchedList;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

const SEARCH_BODY: &str = r#"{
    "Search": [
        {"Title": "The Matrix", "Year": "1999", "imdbID": "tt0133093", "Type": "movie", "Poster": "N/A"},
        {"Title": "The Matrix Reloaded", "Year": "2003", "imdbID": "tt0234215", "Type": "movie", "Poster": "N/A"}
    ],
    "totalResults": "2",
    "Response": "True"
}"#;

const DETAIL_BODY: &str = r#"{
    "Title": "The Matrix",
    "Year": "1999",
    "Released": "31 Mar 1999",
    "Runtime": "136 min",
    "Genre": "Action, Sci-Fi",
    "Director": "Lana Wachowski, Lilly Wachowski",
    "Actors": "Keanu Reeves, Laurence Fishburne",
    "Plot": "A computer hacker learns the truth.",
    "Poster": "N/A",
    "imdbRating": "8.7",
    "imdbID": "tt0133093",
    "Response": "True"
}"#;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

fn temp_store() -> WatchedStore {
    WatchedStore::new(
        std::env::temp_dir()
            .join(format!("popcorntui-e2e-{}", uuid::Uuid::new_v4()))
            .join("watched.json"),
    )
}

fn cleanup(store: &WatchedStore) {
    if let Some(dir) = store.path().parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

/// Wait for one finished fetch and hand it to the app
async fn settle(runtime: &mut Runtime, app: &mut App) {
    let event = timeout(WAIT, runtime.next_event())
        .await
        .expect("fetch timed out")
        .expect("fetch channel closed");
    app.apply_fetch(event);
}

#[tokio::test]
async fn test_search_select_rate_and_persist() {
    let mut server = Server::new_async().await;
    let search = server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("s".into(), "matrix".into()))
        .with_status(200)
        .with_body(SEARCH_BODY)
        .expect(1)
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("i".into(), "tt0133093".into()))
        .with_status(200)
        .with_body(DETAIL_BODY)
        .expect(1)
        .create_async()
        .await;

    let store = temp_store();
    let catalog = Catalog::Omdb(OmdbClient::with_base_url("k", server.url()));
    let mut runtime = Runtime::new(catalog, Duration::ZERO, Some(store.clone()));
    let mut app = App::with_watched(WatchedList::new(), 3);

    // Search
    app.handle_key(key(KeyCode::Char('/')));
    assert_eq!(app.input_mode, InputMode::Editing);
    type_text(&mut app, "matrix");
    assert!(app.search.loading.is_loading());

    runtime.process(&mut app);
    settle(&mut runtime, &mut app).await;
    assert_eq!(app.search.results.len(), 2);
    assert!(!app.search.loading.is_loading());

    // Pick the first result
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.focus, Pane::Results);
    app.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(app.detail.selected_id.as_deref(), Some("tt0133093"));
    assert_eq!(app.focus, Pane::Watched);

    runtime.process(&mut app);
    settle(&mut runtime, &mut app).await;
    assert!(app.detail.movie.is_some());
    assert_eq!(app.terminal_title(), "Movie | The Matrix");

    // Rate, change our mind once, then add
    app.handle_key(key(KeyCode::Char('7')));
    app.handle_key(key(KeyCode::Char('9')));
    app.handle_key(key(KeyCode::Char('a')));

    assert!(!app.detail.is_open());
    assert_eq!(app.terminal_title(), APP_TITLE);
    assert_eq!(app.watched.list.user_rating("tt0133093"), Some(9));

    runtime.process(&mut app);
    assert!(app.error.is_none());

    let saved = store.try_load().unwrap();
    let movie = saved.get("tt0133093").unwrap();
    assert_eq!(movie.user_rating, 9);
    assert_eq!(movie.runtime, Some(136));
    assert_eq!(movie.imdb_rating, Some(8.7));
    assert_eq!(movie.count_rating_decisions, 2);

    search.assert_async().await;
    detail.assert_async().await;
    cleanup(&store);
}

#[tokio::test]
async fn test_fast_typing_only_searches_final_query() {
    let mut server = Server::new_async().await;
    let partial = server
        .mock("GET", "/")
        .match_query(Matcher::Regex("s=mat(r|ri)?$".into()))
        .with_status(200)
        .with_body(SEARCH_BODY)
        .expect(0)
        .create_async()
        .await;
    let full = server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("s".into(), "matrix".into()))
        .with_status(200)
        .with_body(SEARCH_BODY)
        .expect(1)
        .create_async()
        .await;

    let catalog = Catalog::Omdb(OmdbClient::with_base_url("k", server.url()));
    let mut runtime = Runtime::new(catalog, Duration::from_millis(100), None);
    let mut app = App::new();

    app.handle_key(key(KeyCode::Char('/')));
    for c in "matrix".chars() {
        app.handle_key(key(KeyCode::Char(c)));
        runtime.process(&mut app);
    }

    settle(&mut runtime, &mut app).await;
    assert_eq!(app.search.query, "matrix");
    assert_eq!(app.search.results.len(), 2);

    // Nothing else trails in
    assert!(timeout(Duration::from_millis(300), runtime.next_event())
        .await
        .is_err());

    partial.assert_async().await;
    full.assert_async().await;
}

#[tokio::test]
async fn test_deleting_watched_movie_is_persisted() {
    let server = Server::new_async().await;
    let store = temp_store();

    let mut list = WatchedList::new();
    list.add(popcorntui::models::WatchedMovie {
        imdb_id: "tt0133093".into(),
        title: "The Matrix".into(),
        year: "1999".into(),
        poster: None,
        imdb_rating: Some(8.7),
        runtime: Some(136),
        user_rating: 10,
        count_rating_decisions: 1,
    })
    .unwrap();
    store.save(&list).unwrap();

    let catalog = Catalog::Omdb(OmdbClient::with_base_url("k", server.url()));
    let mut runtime = Runtime::new(catalog, Duration::ZERO, Some(store.clone()));
    let mut app = App::with_watched(store.load(), 3);

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.focus, Pane::Watched);
    app.handle_key(key(KeyCode::Char('d')));
    assert!(app.watched.list.is_empty());

    runtime.process(&mut app);
    assert!(store.try_load().unwrap().is_empty());

    cleanup(&store);
}

#[tokio::test]
async fn test_short_query_clears_without_fetching() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let catalog = Catalog::Omdb(OmdbClient::with_base_url("k", server.url()));
    let mut runtime = Runtime::new(catalog, Duration::ZERO, None);
    let mut app = App::new();

    app.handle_key(key(KeyCode::Char('/')));
    type_text(&mut app, "ab");
    runtime.process(&mut app);

    assert!(app.search.results.is_empty());
    assert!(!app.search.loading.is_loading());
    assert!(timeout(Duration::from_millis(200), runtime.next_event())
        .await
        .is_err());

    mock.assert_async().await;
}
