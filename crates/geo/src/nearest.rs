//! Nearest-airport ranking with optional parallelism.
//!
//! Distances are computed for every candidate, then stably sorted so that
//! equal distances keep dataset order.

use crate::{distance, AirportRecord, GeoPoint};
use serde::{Deserialize, Serialize};

/// Number of airports shown around the current position.
pub const DEFAULT_NEAREST_COUNT: usize = 5;

/// An airport together with its distance from the current position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAirport {
    /// The airport
    #[serde(flatten)]
    pub record: AirportRecord,
    /// Great-circle distance in kilometers
    pub distance_km: f64,
}

/// Returns the `k` candidates closest to `current`, closest first.
///
/// Returns an empty list when `current` is the no-fix sentinel `(0, 0)` or
/// there are no candidates.
///
/// # Example
/// ```
/// use flightpath_geo::{nearest, AirportRecord, GeoPoint};
///
/// let airports = vec![
///     AirportRecord::new("EGLL", GeoPoint::new(51.4706, -0.4619)),
///     AirportRecord::new("KPHL", GeoPoint::new(39.8719, -75.2411)),
/// ];
///
/// let ranked = nearest(GeoPoint::new(40.0, -75.0), &airports, 1);
/// assert_eq!(ranked[0].record.name, "KPHL");
/// assert!(nearest(GeoPoint::SENTINEL, &airports, 5).is_empty());
/// ```
pub fn nearest(current: GeoPoint, candidates: &[AirportRecord], k: usize) -> Vec<RankedAirport> {
    if current.is_sentinel() || candidates.is_empty() {
        return Vec::new();
    }

    rank(current, candidates)
        .into_iter()
        .take(k)
        .map(|(index, distance_km)| resolve(candidates, index, distance_km))
        .collect()
}

/// Returns every candidate within `radius_km` of `current`, closest first.
///
/// Follows the same sentinel rule as [`nearest`].
pub fn within_radius(
    current: GeoPoint,
    candidates: &[AirportRecord],
    radius_km: f64,
) -> Vec<RankedAirport> {
    if current.is_sentinel() || candidates.is_empty() {
        return Vec::new();
    }

    rank(current, candidates)
        .into_iter()
        .filter(|&(_, distance_km)| distance_km <= radius_km)
        .map(|(index, distance_km)| resolve(candidates, index, distance_km))
        .collect()
}

/// Computes every distance and sorts `(index, distance)` pairs ascending.
///
/// `sort_by` is stable, and the parallel map preserves input order, so ties
/// always resolve to dataset order. `total_cmp` places NaN distances last.
/// Records are only cloned once the caller has picked its survivors.
fn rank(current: GeoPoint, candidates: &[AirportRecord]) -> Vec<(usize, f64)> {
    let mut ranked = measure_all(current, candidates);
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

fn measure_all(current: GeoPoint, candidates: &[AirportRecord]) -> Vec<(usize, f64)> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        candidates
            .par_iter()
            .enumerate()
            .map(|(index, record)| (index, distance(current, record.location)))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        candidates
            .iter()
            .enumerate()
            .map(|(index, record)| (index, distance(current, record.location)))
            .collect()
    }
}

#[inline]
fn resolve(candidates: &[AirportRecord], index: usize, distance_km: f64) -> RankedAirport {
    RankedAirport {
        record: candidates[index].clone(),
        distance_km,
    }
}
