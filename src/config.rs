//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_SEKTOR_STORAGE_KEY: &str = "sektor";
pub const DEFAULT_SEKTOR_STORAGE_DIR: &str = ".dexkit";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A numeric variable held something other than an unsigned integer.
    #[error("invalid value for {var}: '{value}' is not a whole number of seconds")]
    InvalidNumber { var: String, value: String },

    /// A variable was present but empty.
    #[error("{var} must not be empty")]
    Empty { var: String },
}

/// Optional HTTP timeouts. `None` means the request may wait indefinitely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: Option<u64>,
    pub connect_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeouts: HttpTimeouts,
    pub storage_key: String,
    pub storage_dir: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_POKEAPI_BASE_URL.to_string(),
            timeouts: HttpTimeouts::default(),
            storage_key: DEFAULT_SEKTOR_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from(DEFAULT_SEKTOR_STORAGE_DIR),
        }
    }
}

impl ApiConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `POKEAPI_BASE_URL`: default `https://pokeapi.co/api/v2`
    /// - `HTTP_REQUEST_TIMEOUT_SECS`: no timeout when absent
    /// - `HTTP_CONNECT_TIMEOUT_SECS`: no timeout when absent
    /// - `SEKTOR_STORAGE_KEY`: default `sektor`
    /// - `SEKTOR_STORAGE_DIR`: default `.dexkit`
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a timeout is not a number or a value is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] but reads variables through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ApiConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = non_empty(&lookup, "POKEAPI_BASE_URL")?
            .unwrap_or_else(|| DEFAULT_POKEAPI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let timeouts = HttpTimeouts {
            request_secs: parse_secs(&lookup, "HTTP_REQUEST_TIMEOUT_SECS")?,
            connect_secs: parse_secs(&lookup, "HTTP_CONNECT_TIMEOUT_SECS")?,
        };
        let storage_key =
            non_empty(&lookup, "SEKTOR_STORAGE_KEY")?.unwrap_or_else(|| DEFAULT_SEKTOR_STORAGE_KEY.to_string());
        let storage_dir = non_empty(&lookup, "SEKTOR_STORAGE_DIR")?
            .map_or_else(|| PathBuf::from(DEFAULT_SEKTOR_STORAGE_DIR), PathBuf::from);

        Ok(Self { base_url, timeouts, storage_key, storage_dir })
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Result<Option<String>, ConfigError> {
    match lookup(var) {
        Some(v) if v.trim().is_empty() => Err(ConfigError::Empty { var: var.into() }),
        other => Ok(other),
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, var: &str) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidNumber { var: var.into(), value: raw })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
