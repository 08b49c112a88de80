//! Pollutant scoring against the reference standard.
//!
//! Two weightings exist for the same pollutants and they are kept apart on
//! purpose:
//!
//! - [`COLOR_WEIGHTS`] feed [`classify`], which picks the marker/zone colour.
//! - [`LABEL_WEIGHTS`] feed [`total_assessment`], which picks the textual
//!   "final assessment" shown in popups.
//!
//! Merging them changes what users see for readings near the boundaries.
//!
//! [`pollutant_status`] buckets a single pollutant with its own ratio edges,
//! independent from the composite step function.

use serde::{Deserialize, Serialize};

use crate::models::{
    AssessmentLabel, Concentrations, Observation, PollutantKind, ReferenceStandard, Severity,
};

/// Per-pollutant weights applied to the step multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightSet {
    pub so2: f64,
    pub co: f64,
    pub no2: f64,
    pub formaldehyde: f64,
}

impl WeightSet {
    pub fn weight(&self, pollutant: PollutantKind) -> f64 {
        match pollutant {
            PollutantKind::So2 => self.so2,
            PollutantKind::Co => self.co,
            PollutantKind::No2 => self.no2,
            PollutantKind::Formaldehyde => self.formaldehyde,
        }
    }
}

/// Weights behind the severity colour.
pub const COLOR_WEIGHTS: WeightSet = WeightSet {
    so2: 2.5,
    co: 2.5,
    no2: 3.5,
    formaldehyde: 3.5,
};

/// Weights behind the textual total assessment.
pub const LABEL_WEIGHTS: WeightSet = WeightSet {
    so2: 2.5,
    co: 2.5,
    no2: 3.0,
    formaldehyde: 3.0,
};

/// Composite scores below this are [`Severity::Low`] / below normal.
pub const MODERATE_SCORE: f64 = 6.0;
/// Composite scores at or above this are [`Severity::High`] / exceeding the norm.
pub const HIGH_SCORE: f64 = 10.0;

/// Ratio edges for the single-pollutant status bucket.
pub const STATUS_ELEVATED_RATIO: f64 = 0.8;
pub const STATUS_EXCEEDS_RATIO: f64 = 1.2;

/// Step multiplier for a concentration/threshold ratio.
///
/// | ratio        | multiplier |
/// |--------------|------------|
/// | > 2.0        | 6          |
/// | (1.5, 2.0]   | 4          |
/// | (1.1, 1.5]   | 2          |
/// | [0.8, 1.1]   | 1          |
/// | < 0.8        | 0          |
pub fn severity_multiplier(ratio: f64) -> f64 {
    if ratio > 2.0 {
        6.0
    } else if ratio > 1.5 {
        4.0
    } else if ratio > 1.1 {
        2.0
    } else if ratio >= 0.8 {
        1.0
    } else {
        0.0
    }
}

/// Weighted severity score of one concentration against its threshold.
///
/// Total for `value >= 0` and `norm > 0`. A non-positive or non-finite norm
/// scores 0 rather than dividing by it.
pub fn score(value: f64, norm: f64, weight: f64) -> f64 {
    if !(norm.is_finite() && norm > 0.0) {
        return 0.0;
    }
    severity_multiplier(value / norm) * weight
}

fn weighted_sum(concentrations: &Concentrations, weights: &WeightSet) -> f64 {
    concentrations
        .iter()
        .map(|(kind, value)| score(value, ReferenceStandard::threshold(kind), weights.weight(kind)))
        .sum()
}

fn bucket(total: f64) -> Severity {
    if total < MODERATE_SCORE {
        Severity::Low
    } else if total < HIGH_SCORE {
        Severity::Moderate
    } else {
        Severity::High
    }
}

/// Colour classification of one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorClassification {
    pub composite_score: f64,
    pub severity: Severity,
}

/// Composite colour score over all pollutants using [`COLOR_WEIGHTS`].
pub fn classify(concentrations: &Concentrations) -> ColorClassification {
    let composite_score = weighted_sum(concentrations, &COLOR_WEIGHTS);
    ColorClassification {
        composite_score,
        severity: bucket(composite_score),
    }
}

/// Textual total assessment of one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalAssessment {
    pub total_score: f64,
    pub label: AssessmentLabel,
}

/// Total score over all pollutants using [`LABEL_WEIGHTS`].
pub fn total_assessment(concentrations: &Concentrations) -> TotalAssessment {
    let total_score = weighted_sum(concentrations, &LABEL_WEIGHTS);
    let label = match bucket(total_score) {
        Severity::Low => AssessmentLabel::BelowNormal,
        Severity::Moderate => AssessmentLabel::SlightlyAboveNormal,
        Severity::High => AssessmentLabel::ExceedsNorm,
    };
    TotalAssessment { total_score, label }
}

/// Status of a single pollutant value relative to its threshold.
pub fn pollutant_status(value: f64, norm: f64) -> AssessmentLabel {
    if value < STATUS_ELEVATED_RATIO * norm {
        AssessmentLabel::BelowNormal
    } else if value < STATUS_EXCEEDS_RATIO * norm {
        AssessmentLabel::SlightlyAboveNormal
    } else {
        AssessmentLabel::ExceedsNorm
    }
}

/// One row of the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutantDetail {
    pub pollutant: PollutantKind,
    pub name: String,
    pub value: f64,
    pub threshold: f64,
    pub status: AssessmentLabel,
}

/// Everything a detail panel shows for one observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationAssessment {
    pub pollutants: Vec<PollutantDetail>,
    pub color: ColorClassification,
    pub total: TotalAssessment,
}

/// Build the per-pollutant and composite assessment of an observation.
pub fn describe(observation: &Observation) -> ObservationAssessment {
    let pollutants = observation
        .concentrations
        .iter()
        .map(|(kind, value)| {
            let threshold = ReferenceStandard::threshold(kind);
            PollutantDetail {
                pollutant: kind,
                name: kind.display_name().to_string(),
                value,
                threshold,
                status: pollutant_status(value, threshold),
            }
        })
        .collect();

    ObservationAssessment {
        pollutants,
        color: ColorClassification {
            composite_score: observation.composite_score,
            severity: observation.severity,
        },
        total: total_assessment(&observation.concentrations),
    }
}

#[cfg(test)]
#[path = "scoring_tests.rs"]
mod scoring_tests;
