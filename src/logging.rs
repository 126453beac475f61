//! Logging setup
//!
//! Interactive sessions log to a daily file under the data directory. CLI
//! runs log to stderr. Both honor `POPCORN_LOG` (an `EnvFilter` directive
//! string).

use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Env var holding the filter directives
pub const LOG_ENV: &str = "POPCORN_LOG";

/// Directory for TUI log files
pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("popcorntui")
        .join("logs")
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

/// File logging for TUI mode; keep the guard alive until exit
pub fn init_tui() -> Result<WorkerGuard> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let appender = tracing_appender::rolling::daily(&dir, "popcorntui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter("popcorntui=info"))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init logging: {}", e))?;

    Ok(guard)
}

/// Stderr logging for CLI mode; silent unless `verbose` or `POPCORN_LOG` is set
pub fn init_cli(verbose: bool) {
    let default = if verbose { "popcorntui=debug" } else { "off" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter(default))
        .with_target(false)
        .try_init();
}
