//! CSV-file repository.
//!
//! Both files are read on every fetch; nothing is cached, so edits to the
//! files show up on the next date change.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::db::repository::{
    ErrorContext, RepositoryError, RepositoryResult, SensorDataRepository,
};
use crate::models::{Reading, SensorLocation};
use crate::parsing::{parse_locations_csv, parse_readings_csv};

/// Locations of the two CSV tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvConfig {
    pub locations_path: PathBuf,
    pub readings_path: PathBuf,
}

impl CsvConfig {
    pub fn new(locations_path: impl Into<PathBuf>, readings_path: impl Into<PathBuf>) -> Self {
        Self {
            locations_path: locations_path.into(),
            readings_path: readings_path.into(),
        }
    }

    /// Read paths from `AIRQ_LOCATIONS_CSV` and `AIRQ_READINGS_CSV`.
    pub fn from_env() -> Result<Self, String> {
        let locations = std::env::var("AIRQ_LOCATIONS_CSV")
            .map_err(|_| "AIRQ_LOCATIONS_CSV is not set".to_string())?;
        let readings = std::env::var("AIRQ_READINGS_CSV")
            .map_err(|_| "AIRQ_READINGS_CSV is not set".to_string())?;
        Ok(Self::new(locations, readings))
    }
}

/// Repository backed by two CSV files with header rows.
#[derive(Debug, Clone)]
pub struct CsvRepository {
    config: CsvConfig,
}

impl CsvRepository {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CsvConfig {
        &self.config
    }

    async fn read_table(path: &Path, operation: &str, entity: &str) -> RepositoryResult<Vec<u8>> {
        tokio::fs::read(path).await.map_err(|e| {
            RepositoryError::connection_with_context(
                format!("Failed to read {} table: {}", entity, e),
                ErrorContext::new(operation)
                    .with_entity(entity)
                    .with_entity_id(path.display()),
            )
        })
    }
}

fn decode_error(err: csv::Error, operation: &str, entity: &str, path: &Path) -> RepositoryError {
    let mut context = ErrorContext::new(operation)
        .with_entity(entity)
        .with_entity_id(path.display());
    if let Some(pos) = err.position() {
        context = context.with_details(format!("line={}", pos.line()));
    }
    RepositoryError::validation_with_context(format!("Malformed CSV: {}", err), context)
}

#[async_trait]
impl SensorDataRepository for CsvRepository {
    async fn fetch_locations(&self) -> RepositoryResult<Vec<SensorLocation>> {
        let path = &self.config.locations_path;
        let data = Self::read_table(path, "fetch_locations", "locations").await?;
        let locations = parse_locations_csv(&data)
            .map_err(|e| decode_error(e, "fetch_locations", "locations", path))?;
        debug!("loaded {} sensor locations from {}", locations.len(), path.display());
        Ok(locations)
    }

    async fn fetch_readings(&self) -> RepositoryResult<Vec<Reading>> {
        let path = &self.config.readings_path;
        let data = Self::read_table(path, "fetch_readings", "readings").await?;
        let readings = parse_readings_csv(&data)
            .map_err(|e| decode_error(e, "fetch_readings", "readings", path))?;
        debug!("loaded {} readings from {}", readings.len(), path.display());
        Ok(readings)
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        let locations = tokio::fs::try_exists(&self.config.locations_path).await?;
        let readings = tokio::fs::try_exists(&self.config.readings_path).await?;
        Ok(locations && readings)
    }
}
