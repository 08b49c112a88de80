//! In-memory repository for tests and local development.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::db::repository::{
    ErrorContext, RepositoryError, RepositoryResult, SensorDataRepository,
};
use crate::models::{Reading, SensorLocation};

#[derive(Default)]
struct Tables {
    locations: Vec<SensorLocation>,
    readings: Vec<Reading>,
}

/// In-memory sensor tables.
///
/// Clones share the same tables, so a test can keep a handle and mutate the
/// data a store is reading from.
#[derive(Clone, Default)]
pub struct LocalRepository {
    tables: Arc<RwLock<Tables>>,
    unavailable: Arc<AtomicBool>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-filled with both tables.
    pub fn with_data(locations: Vec<SensorLocation>, readings: Vec<Reading>) -> Self {
        let repo = Self::new();
        {
            let mut tables = repo.tables.write();
            tables.locations = locations;
            tables.readings = readings;
        }
        repo
    }

    pub fn insert_location(&self, location: SensorLocation) {
        self.tables.write().locations.push(location);
    }

    pub fn insert_reading(&self, reading: Reading) {
        self.tables.write().readings.push(reading);
    }

    /// Replace every reading at once.
    pub fn replace_readings(&self, readings: Vec<Reading>) {
        self.tables.write().readings = readings;
    }

    /// Make subsequent fetches fail with a retryable connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self, operation: &str, entity: &str) -> RepositoryResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::connection_with_context(
                "local repository is unavailable",
                ErrorContext::new(operation).with_entity(entity),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl SensorDataRepository for LocalRepository {
    async fn fetch_locations(&self) -> RepositoryResult<Vec<SensorLocation>> {
        self.check_available("fetch_locations", "locations")?;
        Ok(self.tables.read().locations.clone())
    }

    async fn fetch_readings(&self) -> RepositoryResult<Vec<Reading>> {
        self.check_available("fetch_readings", "readings")?;
        Ok(self.tables.read().readings.clone())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(!self.unavailable.load(Ordering::SeqCst))
    }
}
