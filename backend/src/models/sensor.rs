//! Sensor locations, readings and joined observations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::assessment::Severity;
use super::pollutant::Concentrations;

/// Sensor identifier as it appears in both source tables.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorId(pub String);

impl SensorId {
    pub fn new(value: impl Into<String>) -> Self {
        SensorId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SensorId {
    fn from(v: &str) -> Self {
        SensorId(v.to_string())
    }
}

impl From<String> for SensorId {
    fn from(v: String) -> Self {
        SensorId(v)
    }
}

/// A WGS84 point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are finite and inside the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Fixed position of a sensor, loaded once from the location table.
///
/// Coordinates are optional because the source table may carry blank or
/// unparsable cells; such sensors never make it into an observation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorLocation {
    pub sensor_id: SensorId,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl SensorLocation {
    pub fn new(sensor_id: impl Into<SensorId>, latitude: f64, longitude: f64) -> Self {
        Self {
            sensor_id: sensor_id.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Coordinates usable for mapping, if any.
    ///
    /// Missing, non-finite and zero components all count as absent: a zero
    /// coordinate is never a real sensor position in the covered area.
    pub fn resolved_position(&self) -> Option<GeoPoint> {
        let usable = |v: Option<f64>| v.filter(|x| x.is_finite() && *x != 0.0);
        match (usable(self.latitude), usable(self.longitude)) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }
}

/// One sensor's pollutant concentrations for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub date: NaiveDate,
    pub sensor_id: SensorId,
    pub concentrations: Concentrations,
}

impl Reading {
    pub fn new(
        date: NaiveDate,
        sensor_id: impl Into<SensorId>,
        concentrations: Concentrations,
    ) -> Self {
        Self {
            date,
            sensor_id: sensor_id.into(),
            concentrations,
        }
    }
}

/// A reading joined with its sensor's coordinates and derived colour classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub sensor_id: SensorId,
    pub latitude: f64,
    pub longitude: f64,
    pub concentrations: Concentrations,
    pub composite_score: f64,
    pub severity: Severity,
}

impl Observation {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}
