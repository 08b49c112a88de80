use serde::{Deserialize, Serialize};

use crate::models::Observation;
use crate::routes::observations::ObservationView;
use crate::services::scoring::{describe, ObservationAssessment};

/// Detail panel for the selected sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionDetail {
    pub observation: ObservationView,
    pub assessment: ObservationAssessment,
    /// Final assessment as shown to users, e.g. "Exceeds the norm".
    pub summary: String,
}

impl From<&Observation> for SelectionDetail {
    fn from(obs: &Observation) -> Self {
        let assessment = describe(obs);
        Self {
            observation: ObservationView::from(obs),
            summary: assessment.total.label.to_string(),
            assessment,
        }
    }
}

pub const QUERY_POINT: &str = "query_point";
pub const GET_SELECTION: &str = "get_selection";
