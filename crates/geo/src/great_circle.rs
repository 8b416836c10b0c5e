//! Great-circle path interpolation.
//!
//! Points are produced by spherical linear interpolation between the unit
//! vectors of the two endpoints, so every sample lies on the minor arc.

use crate::GeoPoint;
use serde::{Serialize, Serializer};
use std::f64::consts::PI;
use std::ops::Deref;

/// Number of segments used when the caller does not choose one.
pub const DEFAULT_PATH_SAMPLES: usize = 100;

/// Below this `|a × b|` the endpoints are treated as coincident or antipodal.
const DEGENERATE_CROSS: f64 = 1e-9;

/// Ordered samples along a great circle, start and end included.
///
/// Serializes as `[[lat, lon], ...]`, the shape map polylines take.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GreatCirclePath {
    points: Vec<GeoPoint>,
}

impl Deref for GreatCirclePath {
    type Target = [GeoPoint];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl<'a> IntoIterator for &'a GreatCirclePath {
    type Item = &'a GeoPoint;
    type IntoIter = std::slice::Iter<'a, GeoPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl Serialize for GreatCirclePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.points.iter().map(|p| [p.latitude, p.longitude]))
    }
}

/// Samples the great circle from `start` to `end` into `num_points` equal
/// segments, returning `num_points + 1` points.
///
/// Index 0 is exactly `start` and the last index is exactly `end`. A
/// `num_points` of zero is treated as one segment.
///
/// # Example
/// ```
/// use flightpath_geo::{interpolate, GeoPoint};
///
/// let start = GeoPoint::new(40.0, -75.0);
/// let end = GeoPoint::new(51.5, -0.1);
///
/// let path = interpolate(start, end, 4);
/// assert_eq!(path.len(), 5);
/// assert_eq!(path[0], start);
/// assert_eq!(path[4], end);
/// ```
pub fn interpolate(start: GeoPoint, end: GeoPoint, num_points: usize) -> GreatCirclePath {
    let segments = num_points.max(1);

    let points = (0..=segments)
        .map(|i| match i {
            0 => start,
            i if i == segments => end,
            i => intermediate_point(start, end, i as f64 / segments as f64),
        })
        .collect();

    GreatCirclePath { points }
}

/// Point at `fraction` (0 = start, 1 = end) of the way along the minor arc.
///
/// Antipodal endpoints have no unique great circle; the meridian through
/// `start` is used so the result is deterministic.
pub fn intermediate_point(start: GeoPoint, end: GeoPoint, fraction: f64) -> GeoPoint {
    if start == end {
        return start;
    }

    let a = start.to_unit_vector();
    let b = end.to_unit_vector();

    // angle from the vectors themselves; haversine loses ~1e-8 rad near π
    let sin_delta = norm(cross(a, b));
    let cos_delta = dot(a, b);

    if sin_delta < DEGENERATE_CROSS {
        if cos_delta > 0.0 {
            // same place on the sphere, e.g. longitude 180 vs -180
            return start;
        }
        let north = meridian_tangent(start);
        let angle = PI * fraction;
        return GeoPoint::from_vector(combine(a, angle.cos(), north, angle.sin()));
    }

    let delta = sin_delta.atan2(cos_delta);
    let weight_a = ((1.0 - fraction) * delta).sin() / sin_delta;
    let weight_b = (fraction * delta).sin() / sin_delta;

    GeoPoint::from_vector(combine(a, weight_a, b, weight_b))
}

/// Halfway point along the minor arc.
#[inline]
pub fn midpoint(start: GeoPoint, end: GeoPoint) -> GeoPoint {
    intermediate_point(start, end, 0.5)
}

/// Unit vector tangent to the sphere at `point`, pointing north along its meridian.
fn meridian_tangent(point: GeoPoint) -> [f64; 3] {
    let (lat, lon) = point.to_radians();
    [-lat.sin() * lon.cos(), -lat.sin() * lon.sin(), lat.cos()]
}

#[inline]
fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn norm(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

#[inline]
fn combine(a: [f64; 3], wa: f64, b: [f64; 3], wb: f64) -> [f64; 3] {
    [
        a[0] * wa + b[0] * wb,
        a[1] * wa + b[1] * wb,
        a[2] * wa + b[2] * wb,
    ]
}
