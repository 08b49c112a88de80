//! Service layer: scoring, joining, spatial lookup and per-session state.
//!
//! Everything here is independent of how rows are fetched or served; the
//! repository layer supplies rows and the HTTP layer drives the stores.

pub mod join;
pub mod scoring;
pub mod sessions;
pub mod spatial;
pub mod store;

pub use join::{coerce_concentration, join, JoinOutcome};
pub use scoring::{
    classify, describe, pollutant_status, score, severity_multiplier, total_assessment,
    ColorClassification, ObservationAssessment, PollutantDetail, TotalAssessment, WeightSet,
    COLOR_WEIGHTS, LABEL_WEIGHTS,
};
pub use sessions::{Session, SessionRegistry};
pub use spatial::{haversine_distance_m, nearest, LinearScan, NearestResolver};
pub use store::{
    refresh_shared, ObservationSet, ObservationStore, RefreshOutcome, RefreshTicket,
    SelectionUpdate, StoreError,
};
