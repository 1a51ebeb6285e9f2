use std::env;
use std::path::PathBuf;

use clap::Parser;
use parley_config::{ClientConfig, ConfigError};

#[derive(Parser, Debug)]
#[command(name = "parley")]
#[command(about = "Parley - sign in and chat from the terminal")]
#[command(version)]
pub struct Cli {
    /// API origin (overrides PARLEY_API_ORIGIN)
    #[arg(long, value_name = "URL")]
    pub api_origin: Option<String>,

    /// Log file (overrides PARLEY_LOG_FILE)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Route to open on startup
    #[arg(long, default_value = "/", value_name = "PATH")]
    pub route: String,
}

impl Cli {
    /// Client configuration from the environment, with command-line overrides applied
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        self.client_config_with(|key| env::var(key).ok())
    }

    pub fn client_config_with<F>(&self, lookup: F) -> Result<ClientConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ClientConfig::from_lookup(lookup)?;
        match &self.api_origin {
            Some(origin) => config.with_origin(origin),
            None => Ok(config),
        }
    }
}
