//! CLI Command Handlers
//!
//! Each handler takes its CLI args, the services it needs and `Output`, and
//! returns an `ExitCode`.

use crate::api::{Catalog, CatalogError};
use crate::cli::{
    validate_movie_id, ExitCode, InfoCmd, Output, RemovedResponse, SearchCmd, WatchedAction,
    WatchedAddCmd, WatchedCmd, WatchedRemoveCmd,
};
use crate::models::{MovieDetail, WatchedMovie};
use crate::store::WatchedStore;
use crate::watched::WatchedList;

/// Exit code for a catalog failure
pub fn catalog_exit_code(err: &CatalogError) -> ExitCode {
    match err {
        CatalogError::NotFound | CatalogError::NoResults => ExitCode::NotFound,
        e if e.is_network() => ExitCode::NetworkError,
        _ => ExitCode::Error,
    }
}

// =============================================================================
// Search Command
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, catalog: &Catalog, output: &Output) -> ExitCode {
    let query = cmd.query.trim();
    if query.is_empty() {
        return output.error("Search query is empty", ExitCode::InvalidArgs);
    }

    output.info(format!("Searching {} for: {}", catalog.provider(), query));

    match catalog.search(query).await {
        Ok(mut results) => {
            results.truncate(cmd.limit);

            if output.json {
                if let Err(e) = output.print(&results) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else if results.is_empty() {
                output.info("No results");
            } else {
                for result in &results {
                    output.line(format!("{:<12} {}", result.id, result));
                }
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Search failed: {}", e), catalog_exit_code(&e)),
    }
}

// =============================================================================
// Info Command
// =============================================================================

pub async fn info_cmd(cmd: InfoCmd, catalog: &Catalog, output: &Output) -> ExitCode {
    if let Err(e) = validate_movie_id(&cmd.id, catalog.provider()) {
        return output.error(e, ExitCode::InvalidArgs);
    }

    output.info(format!("Getting info for: {}", cmd.id));

    match catalog.detail(&cmd.id).await {
        Ok(detail) => {
            if output.json {
                if let Err(e) = output.print(&detail) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else {
                print_detail(&detail, output);
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Movie info failed: {}", e), catalog_exit_code(&e)),
    }
}

fn print_detail(detail: &MovieDetail, output: &Output) {
    output.line(format!("{} ({})", detail.title, detail.year));
    output.line(format!("{} • {}", detail.released, detail.runtime));
    output.line(&detail.genre);
    output.line(format!("⭐️ {} IMDb rating", detail.imdb_rating));
    if !detail.plot.is_empty() {
        output.line("");
        output.line(&detail.plot);
    }
    output.line("");
    output.line(format!("Starring {}", detail.actors));
    output.line(format!("Directed by {}", detail.director));
}

// =============================================================================
// Watched Commands
// =============================================================================

pub async fn watched_cmd(
    cmd: WatchedCmd,
    catalog: &Catalog,
    store: &WatchedStore,
    output: &Output,
) -> ExitCode {
    let list = match store.try_load() {
        Ok(list) => list,
        Err(e) => return output.error(e.to_string(), ExitCode::Error),
    };

    match cmd.action {
        WatchedAction::List => watched_list_cmd(&list, output),
        WatchedAction::Summary => watched_summary_cmd(&list, output),
        WatchedAction::Add(add) => watched_add_cmd(add, list, catalog, store, output).await,
        WatchedAction::Remove(rm) => watched_remove_cmd(rm, list, store, output),
    }
}

fn watched_list_cmd(list: &WatchedList, output: &Output) -> ExitCode {
    if output.json {
        if let Err(e) = output.print(list.movies()) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else if list.is_empty() {
        output.info("Your watched list is empty");
    } else {
        for movie in list.movies() {
            output.line(format_watched_row(movie));
        }
    }
    ExitCode::Success
}

/// One line per watched movie: id, title, ratings, runtime
pub fn format_watched_row(movie: &WatchedMovie) -> String {
    let imdb = movie
        .imdb_rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "N/A".to_string());
    let runtime = movie
        .runtime
        .map(|r| format!("{} min", r))
        .unwrap_or_else(|| "N/A".to_string());
    format!(
        "{:<12} {}  ⭐️ {}  🌟 {}  ⏳ {}",
        movie.imdb_id, movie.title, imdb, movie.user_rating, runtime
    )
}

fn watched_summary_cmd(list: &WatchedList, output: &Output) -> ExitCode {
    let summary = list.summary();
    if output.json {
        if let Err(e) = output.print(summary) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        let [count, imdb, user, runtime] = crate::ui::watched::summary_fields(&summary);
        output.line(format!("{}  {}  {}  {}", count, imdb, user, runtime));
    }
    ExitCode::Success
}

async fn watched_add_cmd(
    cmd: WatchedAddCmd,
    mut list: WatchedList,
    catalog: &Catalog,
    store: &WatchedStore,
    output: &Output,
) -> ExitCode {
    if let Err(e) = validate_movie_id(&cmd.id, catalog.provider()) {
        return output.error(e, ExitCode::InvalidArgs);
    }
    if let Some(rating) = list.user_rating(&cmd.id) {
        return output.error(
            format!("You rated this movie: {} ⭐", rating),
            ExitCode::InvalidArgs,
        );
    }

    output.info(format!("Fetching {}...", cmd.id));
    let detail = match catalog.detail(&cmd.id).await {
        Ok(detail) => detail,
        Err(e) => return output.error(format!("Movie info failed: {}", e), catalog_exit_code(&e)),
    };

    // One decision: the rating given on the command line
    let movie = WatchedMovie::from_detail(&detail, cmd.rating, 1);
    if let Err(e) = list.add(movie.clone()) {
        return output.error(e.to_string(), ExitCode::InvalidArgs);
    }
    if let Err(e) = store.save(&list) {
        return output.error(e.to_string(), ExitCode::Error);
    }

    if output.json {
        if let Err(e) = output.print(&movie) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.line(format!("Added {}", format_watched_row(&movie)));
    }
    ExitCode::Success
}

fn watched_remove_cmd(
    cmd: WatchedRemoveCmd,
    mut list: WatchedList,
    store: &WatchedStore,
    output: &Output,
) -> ExitCode {
    let removed = match list.remove(&cmd.id) {
        Ok(movie) => movie,
        Err(e) => return output.error(e.to_string(), ExitCode::NotFound),
    };
    if let Err(e) = store.save(&list) {
        return output.error(e.to_string(), ExitCode::Error);
    }

    if output.json {
        let response = RemovedResponse {
            status: "removed".to_string(),
            id: removed.imdb_id,
            title: removed.title,
        };
        if let Err(e) = output.print(&response) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    } else {
        output.line(format!("Removed {}", removed.title));
    }
    ExitCode::Success
}
