//! Global configuration parsing, validation, and environment overrides.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::{AppError, Result};

/// Environment variable overriding [`GlobalConfig::http_host`].
pub const ENV_HTTP_HOST: &str = "TASKMANAGER_HTTP_HOST";
/// Environment variable overriding [`GlobalConfig::http_port`].
pub const ENV_HTTP_PORT: &str = "TASKMANAGER_HTTP_PORT";
/// Environment variable overriding [`GlobalConfig::database_path`].
pub const ENV_DATABASE_PATH: &str = "TASKMANAGER_DATABASE_PATH";

fn default_http_host() -> String {
    "127.0.0.1".into()
}

fn default_http_port() -> u16 {
    5000
}

fn default_database_path() -> PathBuf {
    PathBuf::from("taskmanager.db")
}

/// Global configuration parsed from `config.toml`.
///
/// Every field has a default, so an empty document is a valid configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Interface the HTTP server binds to.
    #[serde(default = "default_http_host")]
    pub http_host: String,
    /// TCP port the HTTP server listens on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Location of the `SQLite` database file.
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            http_host: default_http_host(),
            http_port: default_http_port(),
            database_path: default_database_path(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TASKMANAGER_*` environment overrides on top of the parsed values.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if an override holds an unusable value.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = env::var(ENV_HTTP_HOST) {
            debug!(host = %host, "http host overridden from environment");
            self.http_host = host;
        }
        if let Ok(port) = env::var(ENV_HTTP_PORT) {
            self.http_port = port
                .trim()
                .parse()
                .map_err(|err| AppError::Config(format!("{ENV_HTTP_PORT} invalid: {err}")))?;
            debug!(port = self.http_port, "http port overridden from environment");
        }
        if let Ok(path) = env::var(ENV_DATABASE_PATH) {
            debug!(path = %path, "database path overridden from environment");
            self.database_path = PathBuf::from(path);
        }
        self.validate()
    }

    /// Socket address the HTTP server binds to.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if host and port do not form an address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.http_host, self.http_port)
            .parse()
            .map_err(|err| {
                AppError::Config(format!(
                    "invalid bind address {}:{}: {err}",
                    self.http_host, self.http_port
                ))
            })
    }

    fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(AppError::Config("database_path must not be empty".into()));
        }
        self.bind_addr()?;
        Ok(())
    }
}
