// ABOUTME: Launcher for the Parley terminal chat client
// ABOUTME: Wires configuration, logging, the HTTP client and the TUI together

pub mod args;
pub mod logging;
pub mod terminal;

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::*;
use parley_client::ApiClient;
use parley_config::constants::PARLEY_LOG_FILE;
use parley_core::{Route, SessionStore};
use parley_tui::App;
use tracing::info;

pub use args::Cli;

/// Run the client until the user quits
pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.client_config().context("Invalid configuration")?;

    let log_path = logging::resolve_log_path(
        cli.log_file.as_deref(),
        env::var(PARLEY_LOG_FILE).ok(),
        dirs::home_dir(),
    );
    logging::init_logging(&log_path)?;
    logging::install_panic_hook();

    info!(
        api_origin = %config.api_origin,
        log_file = %log_path.display(),
        "Starting Parley"
    );
    println!("{} {}", "Connecting to".cyan(), config.api_origin);
    println!("{} {}", "Logging to".cyan(), log_path.display());

    let api = Arc::new(ApiClient::new(&config).context("Failed to build HTTP client")?);
    let mut app = App::new(
        api,
        SessionStore::new(),
        Route::parse(&cli.route),
        config.notice_ttl,
    );

    terminal::start_tui(&mut app).await
}
