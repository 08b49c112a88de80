//! Nearest-sensor resolution for point queries on the map.

use crate::models::{GeoPoint, Observation};

/// Mean Earth radius in metres, the same sphere the map layer measures on.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in metres between two points (haversine).
pub fn haversine_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let to_rad = |deg: f64| deg.to_radians();
    let dlat = to_rad(b.lat - a.lat);
    let dlon = to_rad(b.lon - a.lon);
    let h = (dlat / 2.0).sin().powi(2)
        + to_rad(a.lat).cos() * to_rad(b.lat).cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Resolves a point to the closest observation.
///
/// The sensor network is small, so the default implementation is a linear
/// scan; an indexed implementation can be dropped in behind the same trait.
pub trait NearestResolver {
    fn nearest<'a>(&self, point: GeoPoint, observations: &'a [Observation])
        -> Option<&'a Observation>;
}

/// Brute-force resolver over great-circle distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScan;

impl NearestResolver for LinearScan {
    fn nearest<'a>(
        &self,
        point: GeoPoint,
        observations: &'a [Observation],
    ) -> Option<&'a Observation> {
        nearest(point, observations)
    }
}

/// Closest observation to `point`, or `None` for an empty set.
///
/// On equal distances the observation encountered first wins.
pub fn nearest(point: GeoPoint, observations: &[Observation]) -> Option<&Observation> {
    let mut best: Option<(&Observation, f64)> = None;
    for obs in observations {
        let distance = haversine_distance_m(point, obs.position());
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((obs, distance)),
        }
    }
    best.map(|(obs, _)| obs)
}
