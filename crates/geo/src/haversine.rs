//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. Longitude differences are
//! folded across the antimeridian so the shorter way around is always taken.

use crate::GeoPoint;
use std::f64::consts::{PI, TAU};

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two points in kilometers.
///
/// No range validation is performed: out-of-range inputs still yield a
/// number, and NaN inputs yield NaN.
///
/// # Example
/// ```
/// use flightpath_geo::{distance, GeoPoint};
///
/// let a = GeoPoint::new(0.0, 179.0);
/// let b = GeoPoint::new(0.0, -179.0);
///
/// // Across the antimeridian, not the long way round.
/// assert!((distance(a, b) - 222.39).abs() < 0.5);
/// ```
#[inline]
pub fn distance(from: GeoPoint, to: GeoPoint) -> f64 {
    distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two points in meters.
#[inline]
pub fn distance_meters(from: GeoPoint, to: GeoPoint) -> f64 {
    distance_with_radius(from, to, EARTH_RADIUS_M)
}

/// Angular distance in radians between two points.
#[inline]
fn central_angle(from: GeoPoint, to: GeoPoint) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let mut d_lon = lon2 - lon1;
    if d_lon.abs() > PI {
        d_lon -= d_lon.signum() * TAU;
    }

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // clamp keeps NaN; rounding near antipodes can push `a` just past 1
    let a = a.clamp(0.0, 1.0);

    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

#[inline]
fn distance_with_radius(from: GeoPoint, to: GeoPoint, radius: f64) -> f64 {
    radius * central_angle(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PHILADELPHIA: GeoPoint = GeoPoint::new(40.0, -75.0);
    const LONDON: GeoPoint = GeoPoint::new(51.5, -0.1);
    const BERLIN: GeoPoint = GeoPoint::new(52.5200, 13.4050);
    const PARIS: GeoPoint = GeoPoint::new(48.8566, 2.3522);

    #[test]
    fn test_philadelphia_to_london() {
        let d = distance(PHILADELPHIA, LONDON);
        // Expected: ~5687.7 km
        assert!((d - 5687.7).abs() < 5.0, "PHL-LON: {}", d);
    }

    #[test]
    fn test_berlin_to_paris() {
        let d = distance(BERLIN, PARIS);
        assert!((d - 878.0).abs() < 5.0, "Berlin-Paris: {}", d);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(distance(BERLIN, BERLIN), 0.0);
    }

    #[test]
    fn test_antipodal_is_half_circumference() {
        let d = distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!((d - PI * EARTH_RADIUS_KM).abs() < 1e-6, "antipodal: {}", d);
        assert!((d - 20015.09).abs() < 0.01);
    }

    #[test]
    fn test_antimeridian_takes_short_way() {
        let d = distance(GeoPoint::new(0.0, 179.0), GeoPoint::new(0.0, -179.0));
        assert!((d - 222.39).abs() < 0.5, "antimeridian: {}", d);

        let d = distance(GeoPoint::new(0.0, -179.0), GeoPoint::new(0.0, 179.0));
        assert!((d - 222.39).abs() < 0.5, "antimeridian reversed: {}", d);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(distance(GeoPoint::new(f64::NAN, 0.0), LONDON).is_nan());
    }

    #[test]
    fn test_meters_conversion() {
        let km = distance(BERLIN, PARIS);
        let meters = distance_meters(BERLIN, PARIS);
        assert!((meters - km * 1000.0).abs() < 1.0);
    }

    fn point() -> impl Strategy<Value = GeoPoint> {
        (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
    }

    proptest! {
        #[test]
        fn prop_identity(a in point()) {
            prop_assert_eq!(distance(a, a), 0.0);
        }

        #[test]
        fn prop_symmetry(a in point(), b in point()) {
            prop_assert!((distance(a, b) - distance(b, a)).abs() < 1e-9);
        }

        #[test]
        fn prop_bounded_by_half_circumference(a in point(), b in point()) {
            let d = distance(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
