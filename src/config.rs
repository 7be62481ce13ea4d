//! Configuration management for the sandbox.
//!
//! Handles loading configuration from a TOML file and environment variables.
//! The database location is always carried in an explicit [`DatabaseConfig`]
//! handed to the client constructor.

use crate::error::{Result, SandboxError};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable naming the database file.
pub const DATABASE_ENV_VAR: &str = "SQL_SANDBOX_DB";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database location and connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Console behaviour.
    #[serde(default)]
    pub console: ConsoleConfig,
}

/// Database connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Database file. Falls back to the environment, then the platform data dir.
    pub path: Option<PathBuf>,

    /// Use a private in-memory database that lives as long as the client.
    pub in_memory: bool,

    /// How long a connection waits on a locked database.
    pub busy_timeout_ms: u64,

    /// Create the database file if it does not exist.
    pub create_if_missing: bool,
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            in_memory: false,
            busy_timeout_ms: default_busy_timeout_ms(),
            create_if_missing: true,
        }
    }
}

impl DatabaseConfig {
    /// A config for a fresh in-memory database.
    pub fn in_memory() -> Self {
        Self {
            in_memory: true,
            ..Self::default()
        }
    }

    /// A config for a database file at `path`.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Returns the default database file for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sql-sandbox")
            .join("sandbox.db")
    }

    /// Merges another config into this one, with the other taking precedence.
    pub fn merge(&mut self, other: &DatabaseConfig) {
        if other.path.is_some() {
            self.path = other.path.clone();
            self.in_memory = false;
        }
        if other.in_memory {
            self.in_memory = true;
        }
        if other.busy_timeout_ms != default_busy_timeout_ms() {
            self.busy_timeout_ms = other.busy_timeout_ms;
        }
        if !other.create_if_missing {
            self.create_if_missing = false;
        }
    }

    /// Applies the `SQL_SANDBOX_DB` environment variable as the default path.
    pub fn apply_env_defaults(&mut self) {
        if self.path.is_none() && !self.in_memory {
            self.path = std::env::var_os(DATABASE_ENV_VAR).map(PathBuf::from);
        }
    }

    /// The database file that will be opened, if file-backed.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if self.in_memory {
            None
        } else {
            Some(self.path.clone().unwrap_or_else(Self::default_path))
        }
    }

    /// Builds sqlx connect options.
    ///
    /// Every call to `sqlite::memory:` parsing yields a distinct shared-cache
    /// database, so the options must be built once and cloned per connection.
    pub fn connect_options(&self) -> Result<SqliteConnectOptions> {
        let options = match self.resolved_path() {
            None => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| SandboxError::config(format!("Invalid in-memory options: {e}")))?,
            Some(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(self.create_if_missing)
                .journal_mode(SqliteJournalMode::Wal),
        };

        Ok(options
            .foreign_keys(true)
            .busy_timeout(Duration::from_millis(self.busy_timeout_ms)))
    }

    /// Returns a display string for logs and the console banner.
    pub fn display_string(&self) -> String {
        match self.resolved_path() {
            None => "in-memory database".to_string(),
            Some(path) => path.display().to_string(),
        }
    }
}

/// Console output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Bordered text table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Invalid output format: {s}. Expected: table or json"
            )),
        }
    }
}

/// Console configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// How statement results are printed.
    pub output: OutputFormat,

    /// Recreate and reseed the sample tables on startup.
    pub seed_on_start: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::Table,
            seed_on_start: true,
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sql-sandbox")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| SandboxError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            SandboxError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
