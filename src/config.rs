//! Console Configuration
//!
//! JSON file selecting the backing store and sync behaviour. A missing file
//! means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::Locale;
use crate::sync::SyncOptions;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "SITE_ADMIN_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "site_admin.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where list data lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    /// In-memory mock with simulated latency
    Local {
        #[serde(default = "default_latency_ms")]
        latency_ms: u64,
    },
    Sqlite {
        db_path: PathBuf,
    },
    Http {
        base_url: String,
    },
}

fn default_latency_ms() -> u64 {
    800
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Sqlite {
            db_path: PathBuf::from("data/site_admin.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(flatten)]
    pub sync: SyncOptions,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Language used when printing entries
    #[serde(default)]
    pub locale: Locale,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            sync: SyncOptions::default(),
            log_dir: default_log_dir(),
            locale: Locale::default(),
        }
    }
}

impl AdminConfig {
    /// Read `path`; defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Path from `SITE_ADMIN_CONFIG`, else `site_admin.json`
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }
}
