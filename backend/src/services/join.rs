//! Joining the location table with the reading table for one calendar day.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{GeoPoint, Observation, Reading, SensorId, SensorLocation};
use crate::services::scoring::classify;

/// Coerce a raw concentration cell to a non-negative real.
///
/// Sparse sensors leave cells blank or write placeholders; anything that does
/// not parse to a finite, non-negative number becomes 0 instead of failing
/// the row.
pub fn coerce_concentration(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Result of joining one day's readings with sensor locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinOutcome {
    pub date: NaiveDate,
    pub observations: Vec<Observation>,
    /// Readings whose date matched, before dropping and de-duplication.
    pub matched_readings: usize,
    /// Matching readings excluded for lack of usable coordinates.
    pub dropped_missing_coordinates: usize,
    /// Matching readings that replaced an earlier one for the same sensor.
    pub duplicate_readings: usize,
}

impl JoinOutcome {
    /// True when no reading at all exists for the date.
    pub fn no_data_for_date(&self) -> bool {
        self.matched_readings == 0
    }
}

/// Join readings for `target` with sensor locations.
///
/// - The last location record for a sensor id wins.
/// - Only readings dated exactly `target` are considered.
/// - Readings whose sensor has no usable coordinates are dropped.
/// - For duplicate `(date, sensor)` readings the last one wins; the
///   observation keeps the position of the sensor's first reading.
///
/// Output order follows the first appearance of each sensor among the
/// matching readings, so identical inputs always produce identical output.
pub fn join(
    locations: &[SensorLocation],
    readings: &[Reading],
    target: NaiveDate,
) -> JoinOutcome {
    let positions: HashMap<&SensorId, Option<GeoPoint>> = locations
        .iter()
        .map(|loc| (&loc.sensor_id, loc.resolved_position()))
        .collect();

    let mut observations: Vec<Observation> = Vec::new();
    let mut slots: HashMap<&SensorId, usize> = HashMap::new();
    let mut matched_readings = 0;
    let mut dropped_missing_coordinates = 0;
    let mut duplicate_readings = 0;

    for reading in readings.iter().filter(|r| r.date == target) {
        matched_readings += 1;

        let Some(position) = positions.get(&reading.sensor_id).copied().flatten() else {
            dropped_missing_coordinates += 1;
            continue;
        };

        let color = classify(&reading.concentrations);
        let observation = Observation {
            sensor_id: reading.sensor_id.clone(),
            latitude: position.lat,
            longitude: position.lon,
            concentrations: reading.concentrations,
            composite_score: color.composite_score,
            severity: color.severity,
        };

        match slots.get(&reading.sensor_id) {
            Some(&idx) => {
                duplicate_readings += 1;
                observations[idx] = observation;
            }
            None => {
                slots.insert(&reading.sensor_id, observations.len());
                observations.push(observation);
            }
        }
    }

    debug!(
        "joined {} observations for {} ({} matched, {} without coordinates, {} duplicates)",
        observations.len(),
        target,
        matched_readings,
        dropped_missing_coordinates,
        duplicate_readings
    );

    JoinOutcome {
        date: target,
        observations,
        matched_readings,
        dropped_missing_coordinates,
        duplicate_readings,
    }
}

#[cfg(test)]
#[path = "join_tests.rs"]
mod join_tests;
