use std::env;
use std::num::ParseIntError;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::constants::{
    PARLEY_API_ORIGIN, PARLEY_HTTP_CONNECT_TIMEOUT_SECS, PARLEY_HTTP_REQUEST_TIMEOUT_SECS,
    PARLEY_NOTICE_TTL_SECS,
};

/// Origin used when `PARLEY_API_ORIGIN` is not set
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:8747";

/// How long a toast notice stays on screen by default
pub const DEFAULT_NOTICE_TTL_SECS: u64 = 4;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API origin '{value}': {reason}")]
    InvalidOrigin { value: String, reason: String },
    #[error("Invalid value for {name}: {source}")]
    InvalidNumber {
        name: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Settings shared by the HTTP client and the terminal front-end
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// The single API origin every request targets
    pub api_origin: Url,
    /// Whole-request timeout; `None` leaves requests unbounded
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub notice_ttl: Duration,
}

impl ClientConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let origin = get(PARLEY_API_ORIGIN).unwrap_or_else(|| DEFAULT_API_ORIGIN.to_string());
        let api_origin = parse_origin(&origin)?;

        let request_timeout = get(PARLEY_HTTP_REQUEST_TIMEOUT_SECS)
            .map(|v| parse_secs(PARLEY_HTTP_REQUEST_TIMEOUT_SECS, &v))
            .transpose()?;
        let connect_timeout = get(PARLEY_HTTP_CONNECT_TIMEOUT_SECS)
            .map(|v| parse_secs(PARLEY_HTTP_CONNECT_TIMEOUT_SECS, &v))
            .transpose()?;
        let notice_ttl = match get(PARLEY_NOTICE_TTL_SECS) {
            Some(v) => parse_secs(PARLEY_NOTICE_TTL_SECS, &v)?,
            None => Duration::from_secs(DEFAULT_NOTICE_TTL_SECS),
        };

        debug!(
            origin = %api_origin,
            ?request_timeout,
            ?connect_timeout,
            "Loaded client configuration"
        );

        Ok(Self {
            api_origin,
            request_timeout,
            connect_timeout,
            notice_ttl,
        })
    }

    /// Replace the API origin, validating it the same way as the environment value
    pub fn with_origin(mut self, origin: &str) -> Result<Self, ConfigError> {
        self.api_origin = parse_origin(origin)?;
        Ok(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_origin: Url::parse(DEFAULT_API_ORIGIN).expect("default origin is a valid URL"),
            request_timeout: None,
            connect_timeout: None,
            notice_ttl: Duration::from_secs(DEFAULT_NOTICE_TTL_SECS),
        }
    }
}

/// Parse and validate a bare http(s) origin such as `https://chat.example.com:8443`
pub fn parse_origin(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidOrigin {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(value).map_err(|e| invalid(&e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("origin must not carry a path, query or fragment"));
    }

    Ok(url)
}

fn parse_secs(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let secs = value
        .parse::<u64>()
        .map_err(|source| ConfigError::InvalidNumber { name, source })?;
    if secs == 0 {
        return Err(ConfigError::ZeroDuration(name));
    }
    Ok(Duration::from_secs(secs))
}
