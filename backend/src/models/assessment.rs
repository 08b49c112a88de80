use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity class of a composite colour score. Drives the marker and zone colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Moderate,
    High,
}

impl Severity {
    /// Marker colour name used by the map layer.
    pub fn marker_color(&self) -> &'static str {
        match self {
            Severity::Low => "green",
            Severity::Moderate => "yellow",
            Severity::High => "red",
        }
    }

    /// RGB triple used to shade the zone drawn around a sensor.
    pub fn zone_rgb(&self) -> (u8, u8, u8) {
        match self {
            Severity::Low => (0, 128, 0),
            Severity::Moderate => (200, 150, 50),
            Severity::High => (255, 0, 0),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Low => "Low",
            Severity::Moderate => "Moderate",
            Severity::High => "High",
        };
        f.write_str(s)
    }
}

/// Textual assessment shown verbatim in popups and detail panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentLabel {
    #[serde(rename = "Below normal")]
    BelowNormal,
    #[serde(rename = "Slightly above normal")]
    SlightlyAboveNormal,
    #[serde(rename = "Exceeds the norm")]
    ExceedsNorm,
}

impl AssessmentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentLabel::BelowNormal => "Below normal",
            AssessmentLabel::SlightlyAboveNormal => "Slightly above normal",
            AssessmentLabel::ExceedsNorm => "Exceeds the norm",
        }
    }
}

impl fmt::Display for AssessmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_strings() {
        assert_eq!(AssessmentLabel::BelowNormal.to_string(), "Below normal");
        assert_eq!(
            AssessmentLabel::SlightlyAboveNormal.to_string(),
            "Slightly above normal"
        );
        assert_eq!(AssessmentLabel::ExceedsNorm.to_string(), "Exceeds the norm");
    }

    #[test]
    fn test_label_serializes_as_display_string() {
        for label in [
            AssessmentLabel::BelowNormal,
            AssessmentLabel::SlightlyAboveNormal,
            AssessmentLabel::ExceedsNorm,
        ] {
            let json = serde_json::to_value(label).unwrap();
            assert_eq!(json, label.as_str());
            let back: AssessmentLabel = serde_json::from_value(json).unwrap();
            assert_eq!(back, label);
        }
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(Severity::Low.marker_color(), "green");
        assert_eq!(Severity::Moderate.marker_color(), "yellow");
        assert_eq!(Severity::High.marker_color(), "red");
        assert_eq!(Severity::High.zone_rgb(), (255, 0, 0));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Moderate);
        assert!(Severity::Moderate < Severity::High);
    }
}
