use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::index::entry::PackageEntry;

/// Name of the log file inside the data directory
pub const LOG_FILE_NAME: &str = "compact-index.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Publisher configuration
///
/// `versionsFile` has no default; every store is opened on an explicit path.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexConfig {
    /// Path of the versions list file
    pub versions_file: PathBuf,
    /// Derive info checksums for extra entries when rendering contents
    #[serde(default)]
    pub calculate_checksums: bool,
}

impl IndexConfig {
    pub fn new(versions_file: impl Into<PathBuf>) -> Self {
        Self {
            versions_file: versions_file.into(),
            calculate_checksums: false,
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        read_json(path)
    }
}

/// Load a JSON array of package entries
pub fn load_entries(path: &Path) -> Result<Vec<PackageEntry>, ConfigError> {
    read_json(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Returns the path to the data directory for compact-index.
/// Uses $XDG_DATA_HOME/compact-index if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/compact-index,
/// or ./compact-index if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("compact-index")
}
