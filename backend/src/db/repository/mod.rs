//! Repository trait for the external sensor-data source.
//!
//! The core never owns a storage format. It asks a [`SensorDataRepository`]
//! for the full location table and the full reading table, already decoded
//! into typed records, and joins them itself. Fetching is the only place
//! where the core suspends.

mod error;

use async_trait::async_trait;

use crate::models::{Reading, SensorLocation};

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Source of sensor locations and readings.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single instance can serve
/// every session of the HTTP server.
#[async_trait]
pub trait SensorDataRepository: Send + Sync {
    /// Fetch every sensor location record.
    ///
    /// Duplicate ids are returned as-is; the join decides which one wins.
    async fn fetch_locations(&self) -> RepositoryResult<Vec<SensorLocation>>;

    /// Fetch every reading record, for all dates.
    async fn fetch_readings(&self) -> RepositoryResult<Vec<Reading>>;

    /// Check whether the source is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}

/// Both tables of one fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorTables {
    pub locations: Vec<SensorLocation>,
    pub readings: Vec<Reading>,
}

/// Fetch both tables concurrently; fails if either fetch fails.
pub async fn fetch_tables(repo: &dyn SensorDataRepository) -> RepositoryResult<SensorTables> {
    let (locations, readings) = futures::try_join!(
        async {
            repo.fetch_locations()
                .await
                .map_err(|e| e.with_operation("fetch_locations"))
        },
        async {
            repo.fetch_readings()
                .await
                .map_err(|e| e.with_operation("fetch_readings"))
        },
    )?;
    Ok(SensorTables {
        locations,
        readings,
    })
}
