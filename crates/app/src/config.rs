use std::time::Duration;

use heroes_search::{DebounceConfig, DEFAULT_QUIET_PERIOD_MS};

/// Console configuration loaded from environment variables.
///
/// All fields have defaults suitable for running offline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of a remote hero API. `None` uses the offline store.
    pub api_url: Option<String>,
    /// Search debounce settings.
    pub debounce: DebounceConfig,
    /// Maximum retained diagnostic messages; `0` keeps everything.
    pub message_capacity: usize,
    /// Per-request timeout for the remote API.
    pub request_timeout: Duration,
}

/// A variable was set but could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("{var} must be {expected}, got {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub expected: &'static str,
    pub value: String,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                   |
    /// |------------------------|---------------------------|
    /// | `HEROES_API_URL`       | unset (offline store)     |
    /// | `SEARCH_DEBOUNCE_MS`   | `300`                     |
    /// | `MESSAGE_LOG_CAPACITY` | `0` (unbounded)           |
    /// | `REQUEST_TIMEOUT_SECS` | `10` (must be positive)   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("HEROES_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let debounce_ms = parse_u64(&lookup, "SEARCH_DEBOUNCE_MS", DEFAULT_QUIET_PERIOD_MS)?;
        let message_capacity = parse_u64(&lookup, "MESSAGE_LOG_CAPACITY", 0)? as usize;
        // A zero timeout would fail every remote call immediately.
        let request_timeout_secs = parse_u64(&lookup, "REQUEST_TIMEOUT_SECS", 10)?;
        if request_timeout_secs == 0 {
            return Err(ConfigError {
                var: "REQUEST_TIMEOUT_SECS",
                expected: "a positive integer",
                value: request_timeout_secs.to_string(),
            });
        }

        Ok(Self {
            api_url,
            debounce: DebounceConfig::from_millis(debounce_ms),
            message_capacity,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

fn parse_u64<F>(lookup: &F, var: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError {
                var,
                expected: "a non-negative integer",
                value,
            }),
    }
}
