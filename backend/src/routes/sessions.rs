use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::SensorId;
use crate::services::sessions::Session;
use crate::services::store::RefreshOutcome;

/// Summary of a map session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub target_date: Option<NaiveDate>,
    /// Date of the set currently shown; lags `target_date` while a fetch is pending.
    pub shown_date: Option<NaiveDate>,
    pub observations: usize,
    pub selected: Option<SensorId>,
}

impl From<&Session> for SessionInfo {
    fn from(session: &Session) -> Self {
        let store = session.store.lock();
        Self {
            session_id: session.id,
            created_at: session.created_at,
            target_date: store.target_date(),
            shown_date: store.snapshot().date,
            observations: store.observations().len(),
            selected: store.selected_id().cloned(),
        }
    }
}

/// Response to a date change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateChangeResult {
    pub session: SessionInfo,
    pub outcome: RefreshOutcome,
}

pub const CREATE_SESSION: &str = "create_session";
pub const DELETE_SESSION: &str = "delete_session";
pub const SET_SESSION_DATE: &str = "set_session_date";
