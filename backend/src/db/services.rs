//! Service layer over the sensor-data repository.
//!
//! These functions work with any [`SensorDataRepository`] implementation and
//! are what the store and the HTTP layer call.

use chrono::NaiveDate;
use log::info;

use super::repository::{fetch_tables, RepositoryResult, SensorDataRepository};
use crate::services::join::{join, JoinOutcome};

/// Check that the source is reachable.
pub async fn health_check(repo: &dyn SensorDataRepository) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Fetch both tables and join them for `date`, without touching any store.
pub async fn load_observations(
    repo: &dyn SensorDataRepository,
    date: NaiveDate,
) -> RepositoryResult<JoinOutcome> {
    let tables = fetch_tables(repo).await?;
    let outcome = join(&tables.locations, &tables.readings, date);
    if outcome.no_data_for_date() {
        info!("no readings recorded for {}", date);
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::models::{Concentrations, Reading, SensorLocation};

    #[tokio::test]
    async fn test_load_observations_joins_for_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let repo = LocalRepository::with_data(
            vec![SensorLocation::new("s1", 43.2, 76.9)],
            vec![
                Reading::new(date, "s1", Concentrations::new(45.0, 0.0, 0.0, 0.0)),
                Reading::new(date.succ_opt().unwrap(), "s1", Concentrations::default()),
            ],
        );

        let outcome = load_observations(&repo, date).await.unwrap();
        assert_eq!(outcome.observations.len(), 1);
        assert_eq!(outcome.observations[0].composite_score, 15.0);
    }

    #[tokio::test]
    async fn test_load_observations_propagates_fetch_failure() {
        let repo = LocalRepository::new();
        repo.set_unavailable(true);
        let date = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert!(load_observations(&repo, date).await.is_err());
    }
}
