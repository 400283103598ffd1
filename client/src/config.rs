//! Configuration management for the client.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file is honoured when the binary loads it before calling
//! [`Config::from_env`].

use crate::error::ConfigError;
use crate::workflows::{ClientSettings, DEFAULT_NICKNAME, DEFAULT_WAIT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Backend root used when `FSCOMICS_API_URL` is unset
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/";

/// Session file used when `FSCOMICS_SESSION_FILE` is unset
pub const DEFAULT_SESSION_FILE: &str = ".fscomics-session.json";

/// Client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend root URL (`FSCOMICS_API_URL`)
    pub api_url: String,
    /// Where the session token is persisted (`FSCOMICS_SESSION_FILE`)
    pub session_file: PathBuf,
    /// Seconds to wait for each request (`FSCOMICS_WAIT_TIMEOUT_SECS`)
    pub wait_timeout_secs: u64,
    /// Nickname of profiles created at signup (`FSCOMICS_DEFAULT_NICKNAME`)
    pub default_nickname: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            wait_timeout_secs: DEFAULT_WAIT_TIMEOUT.as_secs(),
            default_nickname: DEFAULT_NICKNAME.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to
    /// its value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set but
    /// cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let wait_timeout_secs = match lookup("FSCOMICS_WAIT_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FSCOMICS_WAIT_TIMEOUT_SECS".to_string(), raw))?,
            None => defaults.wait_timeout_secs,
        };

        Ok(Self {
            api_url: lookup("FSCOMICS_API_URL").unwrap_or(defaults.api_url),
            session_file: lookup("FSCOMICS_SESSION_FILE").map_or(defaults.session_file, PathBuf::from),
            wait_timeout_secs,
            default_nickname: lookup("FSCOMICS_DEFAULT_NICKNAME")
                .filter(|nick| !nick.is_empty())
                .unwrap_or(defaults.default_nickname),
        })
    }

    /// Workflow settings derived from this configuration
    #[must_use]
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            wait_timeout: Duration::from_secs(self.wait_timeout_secs),
            default_nickname: self.default_nickname.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.client_settings(), ClientSettings::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("FSCOMICS_API_URL", "https://comics.example.com/"),
            ("FSCOMICS_SESSION_FILE", "/tmp/session.json"),
            ("FSCOMICS_WAIT_TIMEOUT_SECS", " 3 "),
            ("FSCOMICS_DEFAULT_NICKNAME", "newcomer"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "https://comics.example.com/");
        assert_eq!(config.session_file, PathBuf::from("/tmp/session.json"));

        let settings = config.client_settings();
        assert_eq!(settings.wait_timeout, Duration::from_secs(3));
        assert_eq!(settings.default_nickname, "newcomer");
    }

    #[test]
    fn test_unparseable_timeout() {
        let error = Config::from_lookup(lookup(&[("FSCOMICS_WAIT_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(
            error,
            ConfigError::InvalidValue(ref key, ref value)
                if key == "FSCOMICS_WAIT_TIMEOUT_SECS" && value == "soon"
        ));
    }
}
