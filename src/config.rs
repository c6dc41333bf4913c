//! Layered application configuration.
//!
//! Settings are merged in increasing priority:
//!
//! 1. Built-in defaults
//! 2. `config.toml` in the platform config directory
//! 3. `VHC_*` environment variables (`VHC_DATABASE`, `VHC_FRESH`)
//! 4. Command-line flags (applied by the caller)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// File name of the store used when nothing else is configured.
pub const DEFAULT_DATABASE_NAME: &str = "hashes.db";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the SQLite hash store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Clear `mismatched_hashes` before each extraction.
    #[serde(default)]
    pub fresh: bool,
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// Falls back to defaults if the file is unreadable or malformed.
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Ok(path) => path,
            Err(e) => {
                log::debug!("No config directory, using defaults: {}", e);
                return Self::default();
            }
        };
        Self::load_or_default(&path)
    }

    /// Like [`load_from`](Self::load_from), but a bad file or `VHC_*` value
    /// is reported as a warning and every setting reverts to its default.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => {
                log::debug!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Ignoring configuration from {} and VHC_* variables, using defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Merge defaults, the TOML file at `path` (if present), and `VHC_*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed, or a value
    /// has the wrong type.
    pub fn load_from(path: &Path) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("VHC_"))
            .extract()
    }

    /// Store location: the CLI value if given, else the configured one,
    /// else `hashes.db` in the platform data directory.
    ///
    /// Only the platform default has its parent directory created.
    pub fn resolve_database(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_override.or(self.database.as_deref()) {
            return Ok(path.to_path_buf());
        }

        let path = Self::default_database_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }
        Ok(path)
    }

    /// Get the default platform-specific configuration path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Get the default platform-specific store path.
    pub fn default_database_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?
            .data_dir()
            .join(DEFAULT_DATABASE_NAME))
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("org", "vol-hash-comp", "vol-hash-comp")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))
    }
}
