//! PopcornTUI - search movies and keep a rated watched list
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! popcorntui
//!
//! # CLI mode (for automation)
//! popcorntui search "inception"
//! popcorntui watched add tt1375666 --rating 9
//! popcorntui watched summary --json
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use popcorntui::api::Catalog;
use popcorntui::app::{App, APP_TITLE};
use popcorntui::cli::{Cli, Command, ExitCode, Output};
use popcorntui::config::Config;
use popcorntui::runtime::Runtime;
use popcorntui::store::WatchedStore;
use popcorntui::{commands, logging, ui};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Before config loading, which may warn
    let _guard = if cli.is_cli_mode() {
        logging::init_cli(cli.verbose);
        None
    } else {
        Some(logging::init_tui()?)
    };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli, config).await;
        std::process::exit(exit_code.into());
    }

    // TUI mode: launch interactive interface
    run_tui(cli, config).await
}

fn open_store(config: &Config) -> Result<WatchedStore> {
    match &config.watched_path {
        Some(path) => Ok(WatchedStore::new(path)),
        None => Ok(WatchedStore::open_default()?),
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: Config) -> ExitCode {
    let output = Output::new(&cli);
    let provider = cli.provider.map(Into::into).unwrap_or(config.provider);
    let catalog = Catalog::from_config(&config, provider);

    match cli.command {
        Some(Command::Search(cmd)) => commands::search_cmd(cmd, &catalog, &output).await,

        Some(Command::Info(cmd)) => commands::info_cmd(cmd, &catalog, &output).await,

        Some(Command::Watched(cmd)) => match open_store(&config) {
            Ok(store) => commands::watched_cmd(cmd, &catalog, &store, &output).await,
            Err(e) => output.error(format!("{:#}", e), ExitCode::Error),
        },

        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(APP_TITLE))?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(cli: Cli, config: Config) -> Result<()> {
    let provider = cli.provider.map(Into::into).unwrap_or(config.provider);
    let catalog = Catalog::from_config(&config, provider);

    let store = open_store(&config).context("Could not locate the watched list")?;
    let watched = store.load();
    info!(provider = %provider, watched = watched.len(), path = %store.path().display(), "starting TUI");

    let mut app = App::with_watched(watched, config.min_query_len());
    let mut runtime = Runtime::new(catalog, config.debounce(), Some(store));

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, &mut runtime).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, runs effects, renders UI
async fn run_event_loop(terminal: &mut Tui, app: &mut App, runtime: &mut Runtime) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let mut title = APP_TITLE.to_string();

    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Start/cancel fetches, save, and apply finished fetches
        runtime.process(app);

        let next_title = app.terminal_title();
        if next_title != title {
            execute!(terminal.backend_mut(), SetTitle(&next_title))?;
            title = next_title;
        }
    }

    execute!(terminal.backend_mut(), SetTitle(APP_TITLE))?;
    info!("bye");
    Ok(())
}
