//! Configuration for YACS, read from `~/.yacs/config.toml`.
//!
//! Every section and field is optional; accessors on [`YacsConfig`] supply the
//! defaults so callers never deal with `Option` chains.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use yacs_types::TermId;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Default, Deserialize)]
pub struct YacsConfig {
    pub app: Option<AppConfig>,
    pub storage: Option<StorageConfig>,
    pub log: Option<LogConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Term to treat as active at start-up, before the user picks one.
    pub default_term: Option<String>,
}

/// Where selections live between sessions.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Per-term, in-memory; nothing survives the session.
    #[default]
    Memory,
    /// Single JSON document on disk, without term scoping or interest levels.
    Document,
}

impl StorageBackend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Document => "document",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Directory for the document backend. Default: `~/.yacs/storage`.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `"yacs_core=debug"`. `RUST_LOG` wins.
    pub filter: Option<String>,
}

impl YacsConfig {
    /// Load the user config; `Ok(None)` when there is none.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn default_term(&self) -> Option<TermId> {
        self.app
            .as_ref()
            .and_then(|app| app.default_term.as_deref())
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(TermId::from)
    }

    #[must_use]
    pub fn storage_backend(&self) -> StorageBackend {
        self.storage
            .as_ref()
            .map(|storage| storage.backend)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn storage_dir(&self) -> Option<PathBuf> {
        self.storage
            .as_ref()
            .and_then(|storage| storage.path.clone())
            .or_else(|| yacs_dir().map(|dir| dir.join("storage")))
    }

    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log
            .as_ref()
            .and_then(|log| log.filter.as_deref())
            .unwrap_or(DEFAULT_LOG_FILTER)
    }
}

fn yacs_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".yacs"))
}

pub fn config_path() -> Option<PathBuf> {
    yacs_dir().map(|dir| dir.join("config.toml"))
}
