//! Data Transfer Objects for the HTTP API.
//!
//! Response types are re-exported from the routes module since they already
//! derive Serialize/Deserialize; request bodies and query strings live here.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    DateChangeResult, ObservationView, ObservationsData, SelectionDetail, SessionInfo,
    StandardsData,
};

/// Query parameters for the stateless observations endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ObservationsQuery {
    /// Calendar date (`YYYY-MM-DD`); today when omitted
    #[serde(default)]
    pub date: Option<String>,
}

/// Request body for creating a session.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateSessionRequest {
    /// Initial date; today when omitted
    #[serde(default)]
    pub date: Option<String>,
}

/// Request body for a date change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetDateRequest {
    pub date: String,
}

/// Request body for a point query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointQueryRequest {
    pub lat: f64,
    pub lon: f64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Row source status
    pub repository: String,
    /// Number of open sessions
    pub sessions: usize,
}
