use crate::models::{parse_calendar_date, Concentrations, Reading, SensorId, SensorLocation};
use crate::services::join::coerce_concentration;

/// Why a source row was rejected at the boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("expected at least {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("empty sensor id")]
    EmptySensorId,

    #[error("unparsable date '{0}'")]
    InvalidDate(String),
}

/// `(sensorId, latitude, longitude)` as read from the location table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRow {
    pub sensor_id: String,
    pub latitude: String,
    pub longitude: String,
}

impl LocationRow {
    pub const FIELDS: usize = 3;

    /// Build a row from positional cells. Extra trailing cells are ignored.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RowError> {
        if fields.len() < Self::FIELDS {
            return Err(RowError::FieldCount {
                expected: Self::FIELDS,
                found: fields.len(),
            });
        }
        let cell = |i: usize| fields[i].as_ref().trim().to_string();
        let sensor_id = cell(0);
        if sensor_id.is_empty() {
            return Err(RowError::EmptySensorId);
        }
        Ok(Self {
            sensor_id,
            latitude: cell(1),
            longitude: cell(2),
        })
    }

    /// Unparsable coordinates become `None`; the join drops such sensors.
    pub fn into_location(self) -> SensorLocation {
        let coord = |raw: &str| raw.parse::<f64>().ok().filter(|v| v.is_finite());
        SensorLocation {
            latitude: coord(&self.latitude),
            longitude: coord(&self.longitude),
            sensor_id: SensorId(self.sensor_id),
        }
    }
}

/// `(date, sensorId, so2, co, no2, formaldehyde)` as read from the reading table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingRow {
    pub date: String,
    pub sensor_id: String,
    pub so2: String,
    pub co: String,
    pub no2: String,
    pub formaldehyde: String,
}

impl ReadingRow {
    /// Date and sensor id are mandatory; missing concentration cells read as blank.
    pub const REQUIRED_FIELDS: usize = 2;
    pub const FIELDS: usize = 6;

    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RowError> {
        if fields.len() < Self::REQUIRED_FIELDS {
            return Err(RowError::FieldCount {
                expected: Self::REQUIRED_FIELDS,
                found: fields.len(),
            });
        }
        let cell = |i: usize| {
            fields
                .get(i)
                .map(|s| s.as_ref().trim().to_string())
                .unwrap_or_default()
        };
        let sensor_id = cell(1);
        if sensor_id.is_empty() {
            return Err(RowError::EmptySensorId);
        }
        Ok(Self {
            date: cell(0),
            sensor_id,
            so2: cell(2),
            co: cell(3),
            no2: cell(4),
            formaldehyde: cell(5),
        })
    }

    /// Normalise the date and coerce every concentration cell.
    pub fn into_reading(self) -> Result<Reading, RowError> {
        let date = parse_calendar_date(&self.date).ok_or(RowError::InvalidDate(self.date))?;
        let concentrations = Concentrations::new(
            coerce_concentration(&self.so2),
            coerce_concentration(&self.co),
            coerce_concentration(&self.no2),
            coerce_concentration(&self.formaldehyde),
        );
        Ok(Reading {
            date,
            sensor_id: SensorId(self.sensor_id),
            concentrations,
        })
    }
}
