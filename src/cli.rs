//! CLI - Command Line Interface for PopcornTUI
//!
//! Every catalog lookup and watched-list change the TUI performs is also
//! scriptable. Output is JSON when `--json` is given or stdout is not a TTY.
//!
//! # Examples
//!
//! ```bash
//! # Search the catalog
//! popcorntui search "inception" --json
//!
//! # Details for one movie
//! popcorntui info tt1375666
//!
//! # Watched list
//! popcorntui watched add tt1375666 --rating 9
//! popcorntui watched summary
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::models::{Provider, MAX_USER_RATING};

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
    /// Movie not found (catalog or watched list)
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// PopcornTUI - search movies and keep a rated watched list
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "popcorntui",
    version,
    about = "Search movies and keep a rated watched list",
    long_about = "A terminal interface for searching OMDb or TMDB, reading movie \
                  details, and keeping a locally stored list of movies you \
                  watched with your own ratings.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  popcorntui                                Launch interactive TUI\n\
                  popcorntui search \"inception\"             Search for movies\n\
                  popcorntui info tt1375666                 Show movie details\n\
                  popcorntui watched add tt1375666 -r 9     Rate and add to watched\n\
                  popcorntui watched summary --json         Watched statistics"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Debug logging to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Catalog to query (overrides config)
    #[arg(long, short = 'p', global = true, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

/// Catalog choice on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderArg {
    /// The Open Movie Database
    Omdb,
    /// The Movie Database
    Tmdb,
}

impl From<ProviderArg> for Provider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Omdb => Provider::Omdb,
            ProviderArg::Tmdb => Provider::Tmdb,
        }
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search movies by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// Get details for a movie
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Manage the watched list
    #[command(visible_alias = "w")]
    Watched(WatchedCmd),
}

/// Search movies by title
#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Search query (title)
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "10")]
    pub limit: usize,
}

/// Get detailed information about a movie
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// IMDb ID (e.g., tt1375666) or TMDB ID with --provider tmdb
    #[arg(required = true)]
    pub id: String,
}

/// Watched list commands
#[derive(Args, Debug)]
pub struct WatchedCmd {
    #[command(subcommand)]
    pub action: WatchedAction,
}

#[derive(Subcommand, Debug)]
pub enum WatchedAction {
    /// List watched movies
    #[command(visible_alias = "ls")]
    List,

    /// Fetch a movie and add it with your rating
    Add(WatchedAddCmd),

    /// Remove a movie by ID
    #[command(visible_alias = "rm")]
    Remove(WatchedRemoveCmd),

    /// Count and average ratings/runtime
    Summary,
}

#[derive(Args, Debug)]
pub struct WatchedAddCmd {
    /// Movie ID
    #[arg(required = true)]
    pub id: String,

    /// Your rating, 1-10
    #[arg(long, short = 'r', value_parser = clap::value_parser!(u8).range(1..=MAX_USER_RATING as i64))]
    pub rating: u8,
}

#[derive(Args, Debug)]
pub struct WatchedRemoveCmd {
    /// Movie ID
    #[arg(required = true)]
    pub id: String,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Response for a removal
#[derive(Debug, Serialize, Deserialize)]
pub struct RemovedResponse {
    pub status: String,
    pub id: String,
    pub title: String,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print a human-readable line to stdout
    pub fn line(&self, msg: impl std::fmt::Display) {
        println!("{}", msg);
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// ID Validation
// =============================================================================

/// Validate IMDB ID format (tt followed by 7+ digits)
pub fn validate_imdb_id(id: &str) -> Result<&str, &'static str> {
    if id.starts_with("tt") && id.len() >= 9 && id[2..].chars().all(|c| c.is_ascii_digit()) {
        Ok(id)
    } else {
        Err("Invalid IMDB ID format (expected tt followed by 7+ digits)")
    }
}

/// Validate a movie ID for the given catalog
pub fn validate_movie_id(id: &str, provider: Provider) -> Result<&str, &'static str> {
    match provider {
        Provider::Omdb => validate_imdb_id(id),
        Provider::Tmdb if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) => Ok(id),
        Provider::Tmdb => Err("Invalid TMDB ID (expected a number)"),
    }
}

// =============================================================================
// Tests
// =============================================================================
