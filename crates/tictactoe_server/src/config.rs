//! Server configuration.

use std::path::Path;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tictactoe_core::Mark;
use tracing::{debug, info, instrument};

use crate::service::{MAX_SIZE, MIN_SIZE};

/// Configuration for the HTTP game server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Board size used when a create request names none.
    #[serde(default = "default_size")]
    default_size: usize,

    /// Mark played by the computer.
    #[serde(default = "default_computer_mark")]
    computer_mark: Mark,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_size() -> usize {
    3
}

fn default_computer_mark() -> Mark {
    Mark::O
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_size: default_size(),
            computer_mark: default_computer_mark(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or holds
    /// an out-of-range default size.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Replaces host and port where an override is given.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// Checks the default board size against the playable range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `default_size` is outside `MIN_SIZE..=MAX_SIZE`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.default_size) {
            return Err(ConfigError::new(format!(
                "default_size {} must be between {} and {}",
                self.default_size, MIN_SIZE, MAX_SIZE
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
