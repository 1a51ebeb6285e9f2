// ABOUTME: Configuration for the Parley chat client
// ABOUTME: Environment variable names and the client configuration loaded from them

pub mod client;
pub mod constants;

pub use client::{parse_origin, ClientConfig, ConfigError, DEFAULT_API_ORIGIN};
