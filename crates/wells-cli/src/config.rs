//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use wells_api::config::ApiConfig;
use wells_fetcher::FetcherConfig;

/// CLI configuration.
///
/// Every section is optional; missing sections and keys take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream fetching and retry behaviour
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Database location
    #[serde(default)]
    pub store: StoreConfig,

    /// HTTP API listener
    #[serde(default)]
    pub api: ApiConfig,

    /// Output settings
    #[serde(default)]
    pub settings: Settings,
}

/// Database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".wells").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicitly given file must exist. Without one, the default path is
    /// used if present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.fetcher
            .validate()
            .map_err(|e| CliError::Config(format!("[fetcher] {}", e)))?;
        self.api
            .validate()
            .map_err(|e| CliError::Config(format!("[api] {}", e)))?;
        if self.store.database_path.as_os_str().is_empty() {
            return Err(CliError::Config("[store] database_path must not be empty".into()));
        }
        Ok(())
    }

    /// Database path, preferring a command-line override.
    pub fn database_path(&self, overridden: Option<PathBuf>) -> PathBuf {
        overridden.unwrap_or_else(|| self.store.database_path.clone())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_database_path() -> PathBuf {
    PathBuf::from("wells.db")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
