//! CSV tables on disk through the repository, the join and the store.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use airq::db::{CsvConfig, CsvRepository, RepositoryError, SensorDataRepository};
use airq::models::{GeoPoint, Severity};
use airq::services::{ObservationStore, RefreshOutcome, StoreError};

const LOCATIONS: &str = "\
sensor_id,latitude,longitude
alm-01,43.2389,76.8897
alm-02,43.2567,76.9286
alm-03,0,0
alm-04,43.2100,76.8500
";

const READINGS: &str = "\
date,sensor_id,so2,co,no2,formaldehyde
2025-01-15,alm-01,45,0,0,0
2025-01-15,alm-02,5,2000,10,2
2025-01-15,alm-03,100,100,100,100
2025-01-15,alm-04,n/a,,-3,12

2025-01-16,alm-02,5,2000,10,2
2025-01-16,alm-02,30,2000,10,2
bad-date,alm-01,1,1,1,1
";

fn write_tables(dir: &Path, locations: &str, readings: &str) -> CsvConfig {
    let loc = dir.join("sensor_locations.csv");
    let read = dir.join("air_quality_data.csv");
    fs::write(&loc, locations).unwrap();
    fs::write(&read, readings).unwrap();
    CsvConfig::new(loc, read)
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

#[tokio::test]
async fn test_date_change_over_csv_tables() {
    let dir = TempDir::new().unwrap();
    let repo = CsvRepository::new(write_tables(dir.path(), LOCATIONS, READINGS));
    assert!(repo.health_check().await.unwrap());

    let mut store = ObservationStore::new();
    let outcome = store.on_date_change(&repo, date(15)).await.unwrap();

    assert_eq!(
        outcome,
        RefreshOutcome::Applied {
            date: date(15),
            observations: 3,
            dropped_missing_coordinates: 1,
            selection: airq::services::SelectionUpdate::Unselected,
        }
    );

    let ids: Vec<&str> = store
        .observations()
        .iter()
        .map(|o| o.sensor_id.as_str())
        .collect();
    assert_eq!(ids, vec!["alm-01", "alm-02", "alm-04"]);

    let first = &store.observations()[0];
    assert_eq!(first.composite_score, 15.0);
    assert_eq!(first.severity, Severity::High);

    // Unparsable and negative cells are 0; formaldehyde 12 of 10 is multiplier 2.
    let coerced = &store.observations()[2];
    assert_eq!(coerced.concentrations.so2, 0.0);
    assert_eq!(coerced.concentrations.no2, 0.0);
    assert_eq!(coerced.composite_score, 7.0);
    assert_eq!(coerced.severity, Severity::Moderate);
}

#[tokio::test]
async fn test_duplicate_readings_last_wins() {
    let dir = TempDir::new().unwrap();
    let repo = CsvRepository::new(write_tables(dir.path(), LOCATIONS, READINGS));

    let mut store = ObservationStore::new();
    store.on_date_change(&repo, date(16)).await.unwrap();

    assert_eq!(store.observations().len(), 1);
    assert_eq!(store.observations()[0].concentrations.so2, 30.0);
}

#[tokio::test]
async fn test_selection_across_dates() {
    let dir = TempDir::new().unwrap();
    let repo = CsvRepository::new(write_tables(dir.path(), LOCATIONS, READINGS));
    let mut store = ObservationStore::new();

    store.on_date_change(&repo, date(15)).await.unwrap();
    let picked = store.on_point_query(GeoPoint::new(43.2560, 76.9280)).unwrap();
    assert_eq!(picked.sensor_id.as_str(), "alm-02");
    assert_eq!(picked.concentrations.so2, 5.0);

    store.on_date_change(&repo, date(16)).await.unwrap();
    let selected = store.selected().unwrap();
    assert_eq!(selected.sensor_id.as_str(), "alm-02");
    assert_eq!(selected.concentrations.so2, 30.0);
}

#[tokio::test]
async fn test_date_without_readings() {
    let dir = TempDir::new().unwrap();
    let repo = CsvRepository::new(write_tables(dir.path(), LOCATIONS, READINGS));
    let mut store = ObservationStore::new();

    let outcome = store.on_date_change(&repo, date(20)).await.unwrap();
    assert_eq!(outcome, RefreshOutcome::NoDataForDate { date: date(20) });
    assert!(store.observations().is_empty());
}

#[tokio::test]
async fn test_missing_file_keeps_previous_set() {
    let dir = TempDir::new().unwrap();
    let config = write_tables(dir.path(), LOCATIONS, READINGS);
    let repo = CsvRepository::new(config.clone());
    let mut store = ObservationStore::new();
    store.on_date_change(&repo, date(15)).await.unwrap();

    fs::remove_file(&config.readings_path).unwrap();
    assert!(!repo.health_check().await.unwrap());

    let err = store.on_date_change(&repo, date(16)).await.unwrap_err();
    let StoreError::FetchFailed { source, .. } = &err;
    assert!(matches!(source, RepositoryError::ConnectionError { .. }));
    assert!(err.is_retryable());
    assert_eq!(store.snapshot().date, Some(date(15)));
    assert_eq!(store.observations().len(), 3);
}

#[tokio::test]
async fn test_header_only_tables() {
    let dir = TempDir::new().unwrap();
    let repo = CsvRepository::new(write_tables(
        dir.path(),
        "sensor_id,latitude,longitude\n",
        "date,sensor_id,so2,co,no2,formaldehyde\n",
    ));

    assert!(repo.fetch_locations().await.unwrap().is_empty());
    assert!(repo.fetch_readings().await.unwrap().is_empty());
}
