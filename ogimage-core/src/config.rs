//! Runtime Configuration
//!
//! Every field has a default; a JSON config file may override any subset,
//! and CLI flags override the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::persistence::DEFAULT_STORAGE_KEY;

pub const DEFAULT_PREVIEW_BASE_URL: &str = "https://og-image.org/og-templates";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudioConfig {
    /// Directory holding persisted snapshots.
    pub storage_dir: PathBuf,
    /// Namespace key of the snapshot slot.
    pub storage_key: String,
    pub preview_base_url: String,
    /// Default tracing filter level; `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".ogimage"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            preview_base_url: DEFAULT_PREVIEW_BASE_URL.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

impl StudioConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Defaults when `path` is `None` or does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) if p.exists() => Self::from_file(p),
            _ => Ok(Self::default()),
        }
    }
}
