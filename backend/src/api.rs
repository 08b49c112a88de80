//! Public API surface for the air-quality backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::observations::ObservationView;
pub use crate::routes::observations::ObservationsData;
pub use crate::routes::selection::SelectionDetail;
pub use crate::routes::sessions::DateChangeResult;
pub use crate::routes::sessions::SessionInfo;
pub use crate::routes::standards::StandardEntry;
pub use crate::routes::standards::StandardsData;

pub use crate::models::{
    AssessmentLabel, Concentrations, GeoPoint, Observation, PollutantKind, SensorId, Severity,
};
pub use crate::services::scoring::{
    ColorClassification, ObservationAssessment, PollutantDetail, TotalAssessment,
};
pub use crate::services::store::{RefreshOutcome, SelectionUpdate};
