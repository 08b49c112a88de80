//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::RepositoryConfig;
use super::repositories::{CsvConfig, CsvRepository, LocalRepository};
use super::repository::{RepositoryError, RepositoryResult, SensorDataRepository};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// CSV files on disk
    Csv,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("csv", "local"; case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" | "file" => Ok(Self::Csv),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. Without it, CSV is chosen when both
    /// `AIRQ_LOCATIONS_CSV` and `AIRQ_READINGS_CSV` are set, otherwise Local.
    pub fn from_env() -> Self {
        if let Ok(val) = std::env::var("REPOSITORY_TYPE") {
            return val.parse().unwrap_or(Self::Local);
        }

        if CsvConfig::from_env().is_ok() {
            Self::Csv
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use airq::db::{CsvConfig, RepositoryFactory, RepositoryType};
///
/// let config = CsvConfig::new("data/sensor_locations.csv", "data/air_quality_data.csv");
/// let repo = RepositoryFactory::create(RepositoryType::Csv, Some(&config))?;
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// `csv_config` is required for [`RepositoryType::Csv`] and ignored otherwise.
    pub fn create(
        repo_type: RepositoryType,
        csv_config: Option<&CsvConfig>,
    ) -> RepositoryResult<Arc<dyn SensorDataRepository>> {
        match repo_type {
            RepositoryType::Csv => {
                let config = csv_config.ok_or_else(|| {
                    RepositoryError::configuration("CSV repository requires table paths")
                })?;
                Ok(Self::create_csv(config.clone()))
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a CSV-file repository.
    pub fn create_csv(config: CsvConfig) -> Arc<dyn SensorDataRepository> {
        Arc::new(CsvRepository::new(config))
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn SensorDataRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repository from environment configuration.
    pub fn from_env() -> RepositoryResult<Arc<dyn SensorDataRepository>> {
        match RepositoryType::from_env() {
            RepositoryType::Csv => {
                let config = CsvConfig::from_env().map_err(RepositoryError::configuration)?;
                Ok(Self::create_csv(config))
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create repository from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn SensorDataRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config)
    }

    /// Create repository from the default configuration file location.
    pub fn from_default_config() -> RepositoryResult<Arc<dyn SensorDataRepository>> {
        let config = RepositoryConfig::from_default_location()?;
        Self::from_repository_config(&config)
    }

    /// Create repository from a RepositoryConfig instance.
    pub fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn SensorDataRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Csv => Ok(Self::create_csv(config.to_csv_config())),
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }
}
