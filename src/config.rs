//! Client configuration parsed from environment variables and CLI flags.

use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const ENDPOINT_VAR: &str = "MECHANIC_CHAT_ENDPOINT";
pub const REQUEST_TIMEOUT_VAR: &str = "MECHANIC_CHAT_REQUEST_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "MECHANIC_CHAT_CONNECT_TIMEOUT_SECS";

/// Errors produced while building a [`ChatConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The endpoint is not an `http://` or `https://` URL.
    #[error("invalid endpoint '{0}' (expected http:// or https://)")]
    InvalidEndpoint(String),

    /// A numeric setting could not be parsed.
    #[error("invalid value for {var}: '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

/// HTTP timeouts for the query client. No request timeout by default: a
/// slow backend leaves the submission pending until it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: u64,
}

impl QueryTimeouts {
    #[must_use]
    pub fn request(&self) -> Option<Duration> {
        self.request_secs.map(Duration::from_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for QueryTimeouts {
    fn default() -> Self {
        Self { request_secs: None, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub endpoint: String,
    pub timeouts: QueryTimeouts,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_owned(), timeouts: QueryTimeouts::default() }
    }
}

/// Values supplied on the command line. `None` keeps the env/default value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

impl ChatConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `MECHANIC_CHAT_ENDPOINT`: default `http://localhost:5000/`
    /// - `MECHANIC_CHAT_REQUEST_TIMEOUT_SECS`: unset means no timeout
    /// - `MECHANIC_CHAT_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an HTTP URL or a timeout is
    /// not a whole number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = parse_endpoint(
            std::env::var(ENDPOINT_VAR)
                .ok()
                .as_deref()
                .unwrap_or(DEFAULT_ENDPOINT),
        )?;
        let timeouts = QueryTimeouts {
            request_secs: env_parse_u64(REQUEST_TIMEOUT_VAR)?,
            connect_secs: env_parse_u64(CONNECT_TIMEOUT_VAR)?.unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { endpoint, timeouts })
    }

    /// Apply command-line overrides on top of this config.
    ///
    /// # Errors
    ///
    /// Returns an error if the overriding endpoint is not an HTTP URL.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(endpoint) = overrides.endpoint {
            self.endpoint = parse_endpoint(&endpoint)?;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.timeouts.request_secs = Some(secs);
        }
        if let Some(secs) = overrides.connect_timeout_secs {
            self.timeouts.connect_secs = secs;
        }
        Ok(self)
    }
}

fn parse_endpoint(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let has_host = ["http://", "https://"]
        .iter()
        .any(|scheme| trimmed.strip_prefix(*scheme).is_some_and(|rest| !rest.is_empty()));
    if !has_host {
        return Err(ConfigError::InvalidEndpoint(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn env_parse_u64(var: &'static str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(var) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
