//! Diagnostic logging for the reporter and CLI.
//!
//! The console belongs to the progress line, so detailed records (one per
//! transfer event) only go to a file under the XDG state dir. When that file
//! cannot be opened, logging falls back to stderr at `warn`: stderr shares the
//! terminal with the `\r`-overwritten summary line, and per-event records
//! there would tear it.

use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter for the log file when `RUST_LOG` is unset.
pub const FILE_FILTER: &str = "info,xfer=debug,xfer_core=debug";

/// Filter for the stderr fallback when `RUST_LOG` is unset.
pub const TERMINAL_FILTER: &str = "warn";

/// Path of the diagnostic log: `~/.local/state/xfer/xfer.log`.
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("xfer")?;
    Ok(xdg_dirs.place_state_file("xfer.log")?)
}

/// Send diagnostic logs to the state-dir log file.
/// Returns Err (without installing anything) if the file cannot be opened.
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_or(FILE_FILTER))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))?;

    tracing::info!(path = %path.display(), "xfer logging initialized");
    Ok(())
}

/// Fallback when [`init_logging`] fails: warnings and errors only, on stderr.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(terminal_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

fn terminal_filter() -> EnvFilter {
    filter_or(TERMINAL_FILTER)
}

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
