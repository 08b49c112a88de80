//! Repository implementations module.
//!
//! This module contains the implementations of the `SensorDataRepository` trait:
//! - `csv_files`: reads the location and reading tables from CSV files on every fetch
//! - `local`: in-memory implementation for unit testing and local development
pub mod csv_files;
pub mod local;

pub use csv_files::{CsvConfig, CsvRepository};
pub use local::LocalRepository;
