//! CSV decoding for the location and reading tables.
//!
//! Both tables carry a header row, comma-separated cells and no quoting
//! conventions beyond standard CSV. Rows of the wrong shape are skipped and
//! logged; only an undecodable stream is an error.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::warn;

use super::rows::{LocationRow, ReadingRow, RowError};
use crate::models::{Reading, SensorLocation};

fn records(data: &[u8]) -> impl Iterator<Item = Result<StringRecord, csv::Error>> + '_ {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data)
        .into_records()
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.is_empty())
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

fn skip(table: &str, record: &StringRecord, err: &RowError) {
    warn!("skipping {} row at line {}: {}", table, line_of(record), err);
}

/// Decode the location table (`sensorId,latitude,longitude`).
pub fn parse_locations_csv(data: &[u8]) -> Result<Vec<SensorLocation>, csv::Error> {
    let mut out = Vec::new();
    for record in records(data) {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        let fields: Vec<&str> = record.iter().collect();
        match LocationRow::from_fields(&fields) {
            Ok(row) => out.push(row.into_location()),
            Err(e) => skip("location", &record, &e),
        }
    }
    Ok(out)
}

/// Decode the reading table (`date,sensorId,so2,co,no2,formaldehyde`).
pub fn parse_readings_csv(data: &[u8]) -> Result<Vec<Reading>, csv::Error> {
    let mut out = Vec::new();
    for record in records(data) {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        let fields: Vec<&str> = record.iter().collect();
        match ReadingRow::from_fields(&fields).and_then(ReadingRow::into_reading) {
            Ok(reading) => out.push(reading),
            Err(e) => skip("reading", &record, &e),
        }
    }
    Ok(out)
}
