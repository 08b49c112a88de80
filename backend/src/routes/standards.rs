use serde::{Deserialize, Serialize};

use crate::models::{PollutantKind, ReferenceStandard};

/// One row of the reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardEntry {
    pub pollutant: PollutantKind,
    pub name: String,
    pub threshold: f64,
}

/// The reference standard in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardsData {
    pub entries: Vec<StandardEntry>,
}

impl StandardsData {
    pub fn current() -> Self {
        let entries = ReferenceStandard::entries()
            .map(|(pollutant, threshold)| StandardEntry {
                pollutant,
                name: pollutant.display_name().to_string(),
                threshold,
            })
            .collect();
        Self { entries }
    }
}

pub const GET_STANDARDS: &str = "get_standards";
