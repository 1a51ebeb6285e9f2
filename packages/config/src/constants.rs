// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Parley

// Remote API
pub const PARLEY_API_ORIGIN: &str = "PARLEY_API_ORIGIN";

// HTTP client timeouts (unset means no timeout)
pub const PARLEY_HTTP_REQUEST_TIMEOUT_SECS: &str = "PARLEY_HTTP_REQUEST_TIMEOUT_SECS";
pub const PARLEY_HTTP_CONNECT_TIMEOUT_SECS: &str = "PARLEY_HTTP_CONNECT_TIMEOUT_SECS";

// Terminal front-end
pub const PARLEY_NOTICE_TTL_SECS: &str = "PARLEY_NOTICE_TTL_SECS";

// Logging
pub const PARLEY_LOG_FILE: &str = "PARLEY_LOG_FILE";
pub const RUST_LOG: &str = "RUST_LOG";
