use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Concentrations, Observation, SensorId, Severity};
use crate::services::store::ObservationSet;

/// An observation with the derived fields a map marker needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationView {
    pub sensor_id: SensorId,
    pub latitude: f64,
    pub longitude: f64,
    pub concentrations: Concentrations,
    pub composite_score: f64,
    pub severity: Severity,
    pub marker_color: String,
    pub zone_rgb: [u8; 3],
}

impl From<&Observation> for ObservationView {
    fn from(obs: &Observation) -> Self {
        let (r, g, b) = obs.severity.zone_rgb();
        Self {
            sensor_id: obs.sensor_id.clone(),
            latitude: obs.latitude,
            longitude: obs.longitude,
            concentrations: obs.concentrations,
            composite_score: obs.composite_score,
            severity: obs.severity,
            marker_color: obs.severity.marker_color().to_string(),
            zone_rgb: [r, g, b],
        }
    }
}

/// All observations of one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationsData {
    pub date: Option<NaiveDate>,
    pub observations: Vec<ObservationView>,
    pub total: usize,
}

impl ObservationsData {
    pub fn new(date: Option<NaiveDate>, observations: &[Observation]) -> Self {
        let observations: Vec<ObservationView> =
            observations.iter().map(ObservationView::from).collect();
        Self {
            date,
            total: observations.len(),
            observations,
        }
    }
}

impl From<&ObservationSet> for ObservationsData {
    fn from(set: &ObservationSet) -> Self {
        Self::new(set.date, &set.observations)
    }
}

pub const GET_OBSERVATIONS: &str = "get_observations";
pub const GET_SESSION_OBSERVATIONS: &str = "get_session_observations";
