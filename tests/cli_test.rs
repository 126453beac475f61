//! CLI tests
//!
//! Argument parsing plus the command handlers run against a mock catalog and
//! a throwaway watched file.

use std::path::PathBuf;

use clap::Parser;
use mockito::{Matcher, Server, ServerGuard};
use popcorntui::api::{Catalog, OmdbClient, TmdbClient};
use popcorntui::cli::{
    Cli, Command, ExitCode, InfoCmd, Output, ProviderArg, SearchCmd, WatchedAction, WatchedAddCmd,
    WatchedCmd, WatchedRemoveCmd,
};
use popcorntui::commands;
use popcorntui::models::{Provider, WatchedMovie};
use popcorntui::store::WatchedStore;
use popcorntui::watched::WatchedList;

const MATRIX_DETAIL: &str = r#"{
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

fn quiet_json() -> Output {
    Output {
        json: true,
        quiet: true,
    }
}

fn temp_store() -> WatchedStore {
    let path: PathBuf = std::env::temp_dir()
        .join(format!("popcorntui-cli-{}", uuid::Uuid::new_v4()))
        .join("watched.json");
    WatchedStore::new(path)
}

fn cleanup(store: &WatchedStore) {
    if let Some(dir) = store.path().parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

async fn omdb(server: &ServerGuard) -> Catalog {
    Catalog::Omdb(OmdbClient::with_base_url("k", server.url()))
}

fn watched(action: WatchedAction) -> WatchedCmd {
    WatchedCmd { action }
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_search_with_limit() {
    let cli = Cli::parse_from(["popcorntui", "search", "alien", "--limit", "3"]);
    match cli.command {
        Some(Command::Search(cmd)) => {
            assert_eq!(cmd.query, "alien");
            assert_eq!(cmd.limit, 3);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_parse_provider_maps_to_model() {
    let cli = Cli::parse_from(["popcorntui", "-p", "tmdb", "info", "27205"]);
    let provider: Provider = cli.provider.unwrap().into();
    assert_eq!(provider, Provider::Tmdb);
    assert_eq!(cli.provider, Some(ProviderArg::Tmdb));
}

#[test]
fn test_parse_watched_summary_json() {
    let cli = Cli::parse_from(["popcorntui", "watched", "summary", "--json"]);
    assert!(cli.json);
    assert!(matches!(
        cli.command,
        Some(Command::Watched(WatchedCmd {
            action: WatchedAction::Summary
        }))
    ));
}

#[test]
fn test_parse_rejects_missing_rating() {
    assert!(Cli::try_parse_from(["popcorntui", "watched", "add", "tt0133093"]).is_err());
}

// =============================================================================
// Search / Info
// =============================================================================

#[tokio::test]
async fn test_search_cmd_success() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("s".into(), "matrix".into()))
        .with_status(200)
        .with_body(
            r#"{"Search":[{"Title":"The Matrix","Year":"1999","imdbID":"tt0133093","Poster":"N/A"}],
                "Response":"True"}"#,
        )
        .create_async()
        .await;

    let catalog = omdb(&server).await;
    let cmd = SearchCmd {
        query: "matrix".into(),
        limit: 10,
    };
    assert_eq!(
        commands::search_cmd(cmd, &catalog, &quiet_json()).await,
        ExitCode::Success
    );
}

#[tokio::test]
async fn test_search_cmd_server_error_is_network() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let catalog = omdb(&server).await;
    let cmd = SearchCmd {
        query: "matrix".into(),
        limit: 10,
    };
    assert_eq!(
        commands::search_cmd(cmd, &catalog, &quiet_json()).await,
        ExitCode::NetworkError
    );
}

#[tokio::test]
async fn test_tmdb_search_404_is_network_exit() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/movie")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;

    let catalog = Catalog::Tmdb(TmdbClient::with_base_url("k", server.url()));
    let cmd = SearchCmd {
        query: "inception".into(),
        limit: 10,
    };
    assert_eq!(
        commands::search_cmd(cmd, &catalog, &quiet_json()).await,
        ExitCode::NetworkError
    );
}

#[tokio::test]
async fn test_search_cmd_blank_query() {
    let server = Server::new_async().await;
    let catalog = omdb(&server).await;
    let cmd = SearchCmd {
        query: "   ".into(),
        limit: 10,
    };
    assert_eq!(
        commands::search_cmd(cmd, &catalog, &quiet_json()).await,
        ExitCode::InvalidArgs
    );
}

#[tokio::test]
async fn test_info_cmd_validates_id() {
    let server = Server::new_async().await;
    let catalog = omdb(&server).await;
    let cmd = InfoCmd { id: "matrix".into() };
    assert_eq!(
        commands::info_cmd(cmd, &catalog, &quiet_json()).await,
        ExitCode::InvalidArgs
    );
}

#[tokio::test]
async fn test_info_cmd_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#)
        .create_async()
        .await;

    let catalog = omdb(&server).await;
    let cmd = InfoCmd {
        id: "tt9999999".into(),
    };
    assert_eq!(
        commands::info_cmd(cmd, &catalog, &quiet_json()).await,
        ExitCode::NotFound
    );
}

// =============================================================================
// Watched
// =============================================================================

#[tokio::test]
async fn test_watched_add_fetches_and_persists() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_query(Matcher::UrlEncoded("i".into(), "tt0133093".into()))
        .with_status(200)
        .with_body(MATRIX_DETAIL)
        .create_async()
        .await;

    let catalog = omdb(&server).await;
    let store = temp_store();

    let cmd = watched(WatchedAction::Add(WatchedAddCmd {
        id: "tt0133093".into(),
        rating: 9,
    }));
    assert_eq!(
        commands::watched_cmd(cmd, &catalog, &store, &quiet_json()).await,
        ExitCode::Success
    );
    mock.assert_async().await;

    let list = store.try_load().unwrap();
    let movie = list.get("tt0133093").unwrap();
    assert_eq!(movie.user_rating, 9);
    assert_eq!(movie.runtime, Some(136));
    assert_eq!(movie.count_rating_decisions, 1);

    // Second add is refused without another fetch
    let again = watched(WatchedAction::Add(WatchedAddCmd {
        id: "tt0133093".into(),
        rating: 3,
    }));
    assert_eq!(
        commands::watched_cmd(again, &catalog, &store, &quiet_json()).await,
        ExitCode::InvalidArgs
    );
    assert_eq!(store.try_load().unwrap().user_rating("tt0133093"), Some(9));

    cleanup(&store);
}

#[tokio::test]
async fn test_watched_remove() {
    let server = Server::new_async().await;
    let catalog = omdb(&server).await;
    let store = temp_store();

    let mut list = WatchedList::new();
    list.add(WatchedMovie {
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

    let cmd = watched(WatchedAction::Remove(WatchedRemoveCmd {
        id: "tt0133093".into(),
    }));
    assert_eq!(
        commands::watched_cmd(cmd, &catalog, &store, &quiet_json()).await,
        ExitCode::Success
    );
    assert!(store.try_load().unwrap().is_empty());

    let missing = watched(WatchedAction::Remove(WatchedRemoveCmd {
        id: "tt0133093".into(),
    }));
    assert_eq!(
        commands::watched_cmd(missing, &catalog, &store, &quiet_json()).await,
        ExitCode::NotFound
    );

    cleanup(&store);
}

#[tokio::test]
async fn test_watched_list_and_summary_on_empty_store() {
    let server = Server::new_async().await;
    let catalog = omdb(&server).await;
    let store = temp_store();

    assert_eq!(
        commands::watched_cmd(watched(WatchedAction::List), &catalog, &store, &quiet_json()).await,
        ExitCode::Success
    );
    assert_eq!(
        commands::watched_cmd(watched(WatchedAction::Summary), &catalog, &store, &quiet_json())
            .await,
        ExitCode::Success
    );
    // Reading never creates the file
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_watched_corrupt_store_is_error() {
    let server = Server::new_async().await;
    let catalog = omdb(&server).await;
    let store = temp_store();
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "not json").unwrap();

    assert_eq!(
        commands::watched_cmd(watched(WatchedAction::List), &catalog, &store, &quiet_json()).await,
        ExitCode::Error
    );

    cleanup(&store);
}
