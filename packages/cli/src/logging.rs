//! File logging and panic reporting.
//!
//! The terminal belongs to the UI, so everything goes to a log file.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use parley_config::constants::RUST_LOG;
use tracing::error;
use tracing_subscriber::EnvFilter;

pub const LOG_DIR: &str = ".parley";
pub const LOG_FILE_NAME: &str = "parley.log";

/// Pick the log file: flag, then environment, then `~/.parley/parley.log`
pub fn resolve_log_path(
    explicit: Option<&Path>,
    from_env: Option<String>,
    home: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    if let Some(path) = from_env.filter(|p| !p.trim().is_empty()) {
        return PathBuf::from(path.trim());
    }
    match home {
        Some(home) => home.join(LOG_DIR).join(LOG_FILE_NAME),
        None => PathBuf::from(LOG_FILE_NAME),
    }
}

/// Install the global subscriber writing to `path`
pub fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(RUST_LOG).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

/// Route panic reports into the log instead of the alternate screen
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        error!(%location, %message, "Panic");
    }));
}
