//! Loader/core boundary.
//!
//! Source tables arrive as positional string cells. This module turns them
//! into typed rows, validates the field count, and hands out
//! [`SensorLocation`](crate::models::SensorLocation) and
//! [`Reading`](crate::models::Reading) records. Numeric leniency
//! (blank or garbage concentrations become 0) is applied here, never in
//! scoring.

pub mod csv_tables;
pub mod rows;

pub use csv_tables::{parse_locations_csv, parse_readings_csv};
pub use rows::{LocationRow, ReadingRow, RowError};
