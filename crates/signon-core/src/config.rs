//! Configuration management for signon.
//!
//! Loads configuration from ${SIGNON_HOME}/config.toml with sensible
//! defaults when the file is absent.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Well-known locations for signon files.
pub mod paths {
    use std::env;
    use std::path::PathBuf;

    /// Returns the user's home directory, if resolvable.
    pub fn home_dir() -> Option<PathBuf> {
        env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .map(PathBuf::from)
    }

    /// Base directory for signon files: `$SIGNON_HOME`, else `~/.signon`.
    pub fn signon_home() -> PathBuf {
        if let Some(home) = env::var_os("SIGNON_HOME") {
            return PathBuf::from(home);
        }
        home_dir().unwrap_or_default().join(".signon")
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        signon_home().join("config.toml")
    }

    /// Default path for the log file.
    pub fn log_path() -> PathBuf {
        signon_home().join("signon.log")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulated endpoint latency for the mock authenticator, in ms.
    pub mock_delay_ms: u64,

    /// Destination handed to the navigation collaborator after login.
    pub destination: String,

    /// Initial state of the "remember me" flag.
    pub remember: bool,
}

impl Config {
    const DEFAULT_MOCK_DELAY_MS: u64 = 900;
    const DEFAULT_DESTINATION: &str = "/dashboard";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mock_delay_ms: Self::DEFAULT_MOCK_DELAY_MS,
            destination: Self::DEFAULT_DESTINATION.to_string(),
            remember: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_from(&dir.path().join("config.toml")).expect("load");
        assert_eq!(config.mock_delay_ms, 900);
        assert_eq!(config.destination, "/dashboard");
        assert!(config.remember);
    }

    #[test]
    fn partial_file_keeps_defaults_for_absent_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "mock_delay_ms = 5\n").expect("write");

        let config = Config::load_from(&path).expect("load");
        assert_eq!(config.mock_delay(), Duration::from_millis(5));
        assert_eq!(config.destination, "/dashboard");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "destination = [not toml").expect("write");

        assert!(Config::load_from(&path).is_err());
    }
}
