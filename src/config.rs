use crate::consts::catalog_consts::{CATALOG_FILE, DATA_DIR, DATA_FILE_EXTENSION};
use crate::errors::config_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where an engine keeps its files.
///
/// ```json
/// { "data_dir": "./data", "catalog_file": "catalog.meta", "data_file_extension": "dat" }
/// ```
///
/// Missing keys take their defaults. `data_dir: null` runs the engine
/// entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub data_dir: Option<PathBuf>,
    pub catalog_file: String,
    pub data_file_extension: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: Some(PathBuf::from(DATA_DIR)),
            catalog_file: CATALOG_FILE.to_string(),
            data_file_extension: DATA_FILE_EXTENSION.to_string(),
        }
    }
}

impl EngineConfig {
    /// Default file names under `data_dir`.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
            ..Self::default()
        }
    }

    pub fn in_memory() -> Self {
        Self {
            data_dir: None,
            ..Self::default()
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join(&self.catalog_file))
    }
}
