//! Pollutant kinds, concentration vectors and the reference standard.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of pollutants tracked by the sensor network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollutantKind {
    So2,
    Co,
    No2,
    Formaldehyde,
}

impl PollutantKind {
    /// All pollutants, in table column order.
    pub const ALL: [PollutantKind; 4] = [
        PollutantKind::So2,
        PollutantKind::Co,
        PollutantKind::No2,
        PollutantKind::Formaldehyde,
    ];

    /// Label shown next to a value in detail views.
    pub fn display_name(&self) -> &'static str {
        match self {
            PollutantKind::So2 => "SO₂",
            PollutantKind::Co => "CO",
            PollutantKind::No2 => "NO₂",
            PollutantKind::Formaldehyde => "Formaldehyde",
        }
    }

    /// Safety threshold in µg/m³ from the reference standard.
    pub fn threshold(&self) -> f64 {
        ReferenceStandard::threshold(*self)
    }
}

impl fmt::Display for PollutantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Static per-pollutant safety thresholds (µg/m³).
///
/// The values follow the WHO air quality guidelines and never change during
/// the lifetime of the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceStandard;

impl ReferenceStandard {
    pub const SO2: f64 = 20.0;
    pub const CO: f64 = 10_000.0;
    pub const NO2: f64 = 40.0;
    pub const FORMALDEHYDE: f64 = 10.0;

    /// Threshold for a pollutant. Always strictly positive.
    pub const fn threshold(pollutant: PollutantKind) -> f64 {
        match pollutant {
            PollutantKind::So2 => Self::SO2,
            PollutantKind::Co => Self::CO,
            PollutantKind::No2 => Self::NO2,
            PollutantKind::Formaldehyde => Self::FORMALDEHYDE,
        }
    }

    /// `(pollutant, threshold)` pairs in table order.
    pub fn entries() -> impl Iterator<Item = (PollutantKind, f64)> {
        PollutantKind::ALL
            .into_iter()
            .map(|kind| (kind, Self::threshold(kind)))
    }
}

/// Concentrations of every tracked pollutant for one reading (µg/m³).
///
/// Fields are always finite and non-negative once a reading has passed the
/// loader boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Concentrations {
    pub so2: f64,
    pub co: f64,
    pub no2: f64,
    pub formaldehyde: f64,
}

impl Concentrations {
    pub fn new(so2: f64, co: f64, no2: f64, formaldehyde: f64) -> Self {
        Self {
            so2,
            co,
            no2,
            formaldehyde,
        }
    }

    pub fn get(&self, pollutant: PollutantKind) -> f64 {
        match pollutant {
            PollutantKind::So2 => self.so2,
            PollutantKind::Co => self.co,
            PollutantKind::No2 => self.no2,
            PollutantKind::Formaldehyde => self.formaldehyde,
        }
    }

    pub fn set(&mut self, pollutant: PollutantKind, value: f64) {
        match pollutant {
            PollutantKind::So2 => self.so2 = value,
            PollutantKind::Co => self.co = value,
            PollutantKind::No2 => self.no2 = value,
            PollutantKind::Formaldehyde => self.formaldehyde = value,
        }
    }

    /// `(pollutant, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (PollutantKind, f64)> + '_ {
        PollutantKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_standard_values() {
        assert_eq!(ReferenceStandard::threshold(PollutantKind::So2), 20.0);
        assert_eq!(ReferenceStandard::threshold(PollutantKind::Co), 10_000.0);
        assert_eq!(ReferenceStandard::threshold(PollutantKind::No2), 40.0);
        assert_eq!(ReferenceStandard::threshold(PollutantKind::Formaldehyde), 10.0);
    }

    #[test]
    fn test_thresholds_are_positive() {
        assert!(ReferenceStandard::entries().all(|(_, t)| t > 0.0));
        assert_eq!(ReferenceStandard::entries().count(), 4);
    }

    #[test]
    fn test_concentrations_get_set() {
        let mut c = Concentrations::default();
        c.set(PollutantKind::No2, 12.5);
        assert_eq!(c.get(PollutantKind::No2), 12.5);
        assert_eq!(c.no2, 12.5);
        assert_eq!(c.get(PollutantKind::So2), 0.0);
    }

    #[test]
    fn test_concentrations_iter_order() {
        let c = Concentrations::new(1.0, 2.0, 3.0, 4.0);
        let values: Vec<_> = c.iter().collect();
        assert_eq!(
            values,
            vec![
                (PollutantKind::So2, 1.0),
                (PollutantKind::Co, 2.0),
                (PollutantKind::No2, 3.0),
                (PollutantKind::Formaldehyde, 4.0),
            ]
        );
    }

    #[test]
    fn test_pollutant_serde_names() {
        let json = serde_json::to_string(&PollutantKind::Formaldehyde).unwrap();
        assert_eq!(json, "\"formaldehyde\"");
        let kind: PollutantKind = serde_json::from_str("\"so2\"").unwrap();
        assert_eq!(kind, PollutantKind::So2);
    }
}
