//! Repository configuration file support.
//!
//! This module provides utilities for reading repository configuration from
//! TOML configuration files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repositories::CsvConfig;
use super::repository::RepositoryError;

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub csv: CsvSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// CSV table settings. When loaded through [`RepositoryConfig::from_file`],
/// relative paths resolve against the directory holding the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvSettings {
    #[serde(default = "default_locations_path")]
    pub locations_path: PathBuf,
    #[serde(default = "default_readings_path")]
    pub readings_path: PathBuf,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            locations_path: default_locations_path(),
            readings_path: default_readings_path(),
        }
    }
}

fn default_locations_path() -> PathBuf {
    PathBuf::from("data/sensor_locations.csv")
}

fn default_readings_path() -> PathBuf {
    PathBuf::from("data/air_quality_data.csv")
}

impl CsvSettings {
    fn resolve_relative(&mut self, base: &Path) {
        for path in [&mut self.locations_path, &mut self.readings_path] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// Relative CSV paths (including the defaults) are anchored at the
    /// file's directory, so `backend/repository.toml` finds `backend/data/`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        if let Some(dir) = path.parent() {
            config.csv.resolve_relative(dir);
        }
        Ok(config)
    }

    /// Parse repository configuration from TOML text. Paths are kept as written.
    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Load repository configuration from the default location.
    ///
    /// Searches for `repository.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = [
            PathBuf::from("repository.toml"),
            PathBuf::from("backend/repository.toml"),
            PathBuf::from("../repository.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No repository.toml found in standard locations",
        ))
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    /// CSV table locations, with `AIRQ_LOCATIONS_CSV` / `AIRQ_READINGS_CSV`
    /// taking precedence over the file.
    pub fn to_csv_config(&self) -> CsvConfig {
        let locations = std::env::var("AIRQ_LOCATIONS_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.csv.locations_path.clone());
        let readings = std::env::var("AIRQ_READINGS_CSV")
            .map(PathBuf::from)
            .unwrap_or_else(|_| self.csv.readings_path.clone());
        CsvConfig::new(locations, readings)
    }
}
