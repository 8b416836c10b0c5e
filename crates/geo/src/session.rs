//! Snapshot-driven tracking.
//!
//! A [`TrackingSession`] owns the read-only candidate set for one dataset
//! load. Each position update becomes a fresh [`TrackingSnapshot`] and
//! [`TrackingSession::compute`] turns it into a [`TrackingFrame`]; nothing is
//! carried over between calls.

use crate::{
    distance, interpolate, nearest, AirportRecord, GeoError, GeoPoint, GreatCirclePath,
    RankedAirport, Result, DEFAULT_NEAREST_COUNT, DEFAULT_PATH_SAMPLES,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Tunables for frame computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingSettings {
    /// How many nearby airports to rank
    pub nearest_count: usize,
    /// Segments in the route to the destination
    pub path_samples: usize,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            nearest_count: DEFAULT_NEAREST_COUNT,
            path_samples: DEFAULT_PATH_SAMPLES,
        }
    }
}

/// Latest known inputs, replaced wholesale on every update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    /// Device position, or [`GeoPoint::SENTINEL`] before the first fix
    pub current: GeoPoint,
    /// Chosen destination, if any
    #[serde(default)]
    pub destination: Option<GeoPoint>,
}

impl TrackingSnapshot {
    pub fn new(current: GeoPoint, destination: Option<GeoPoint>) -> Self {
        Self { current, destination }
    }

    /// Snapshot before any position fix.
    pub fn awaiting_fix(destination: Option<GeoPoint>) -> Self {
        Self::new(GeoPoint::SENTINEL, destination)
    }

    /// Same destination, new position.
    #[must_use]
    pub fn with_position(self, current: GeoPoint) -> Self {
        Self { current, ..self }
    }

    pub fn has_fix(&self) -> bool {
        !self.current.is_sentinel()
    }
}

/// Everything the map view shows for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingFrame {
    /// Position the frame was computed for
    pub position: GeoPoint,
    /// Distance to the destination in kilometers
    pub distance_km: Option<f64>,
    /// Closest airports, closest first
    pub nearest: Vec<RankedAirport>,
    /// Route from the position to the destination
    pub path: Option<GreatCirclePath>,
}

/// Candidate airports and settings for one dataset load.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    candidates: Arc<[AirportRecord]>,
    settings: TrackingSettings,
}

impl TrackingSession {
    pub fn new(candidates: impl Into<Arc<[AirportRecord]>>, settings: TrackingSettings) -> Self {
        Self {
            candidates: candidates.into(),
            settings,
        }
    }

    pub fn candidates(&self) -> &[AirportRecord] {
        &self.candidates
    }

    /// Computes the frame for `snapshot`.
    ///
    /// Without a fix, or without a destination, distance and path are `None`;
    /// the nearest list is empty whenever there is no fix.
    pub fn compute(&self, snapshot: &TrackingSnapshot) -> TrackingFrame {
        let current = snapshot.current;
        let route = snapshot.destination.filter(|_| snapshot.has_fix());

        TrackingFrame {
            position: current,
            distance_km: route.map(|dest| distance(current, dest)),
            nearest: nearest(current, &self.candidates, self.settings.nearest_count),
            path: route.map(|dest| interpolate(current, dest, self.settings.path_samples)),
        }
    }
}

/// Validates an airport picked from the selection list as a destination.
///
/// A destination with a zero latitude or zero longitude is refused, as is
/// any non-finite or out-of-range position.
pub fn select_destination(record: &AirportRecord) -> Result<GeoPoint> {
    let location = GeoPoint::try_new(record.location.latitude, record.location.longitude)?;
    if location.latitude == 0.0 || location.longitude == 0.0 {
        return Err(GeoError::InvalidDestination(format!(
            "{:?} at {} lies on the equator or prime meridian",
            record.name, location
        )));
    }
    Ok(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeoErrorCode;

    const PHILADELPHIA: GeoPoint = GeoPoint::new(40.0, -75.0);
    const LONDON: GeoPoint = GeoPoint::new(51.5, -0.1);

    fn session() -> TrackingSession {
        let airports = vec![
            AirportRecord::new("KPHL", GeoPoint::new(39.8719, -75.2411)),
            AirportRecord::new("KJFK", GeoPoint::new(40.6398, -73.7789)),
            AirportRecord::new("EGLL", GeoPoint::new(51.4706, -0.4619)),
        ];
        TrackingSession::new(airports, TrackingSettings { nearest_count: 2, path_samples: 4 })
    }

    #[test]
    fn test_frame_end_to_end() {
        let frame = session().compute(&TrackingSnapshot::new(PHILADELPHIA, Some(LONDON)));

        let d = frame.distance_km.unwrap();
        assert!((d - 5687.7).abs() < 5.0, "distance: {}", d);

        let names: Vec<_> = frame.nearest.iter().map(|r| r.record.name.as_str()).collect();
        assert_eq!(names, vec!["KPHL", "KJFK"]);

        let path = frame.path.unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], PHILADELPHIA);
        assert_eq!(path[4], LONDON);
        let ratio = distance(path[2], PHILADELPHIA) / distance(path[2], LONDON);
        assert!((ratio - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_frame_without_fix() {
        let frame = session().compute(&TrackingSnapshot::awaiting_fix(Some(LONDON)));
        assert_eq!(frame.position, GeoPoint::SENTINEL);
        assert!(frame.distance_km.is_none());
        assert!(frame.nearest.is_empty());
        assert!(frame.path.is_none());
    }

    #[test]
    fn test_frame_without_destination() {
        let frame = session().compute(&TrackingSnapshot::new(PHILADELPHIA, None));
        assert!(frame.distance_km.is_none());
        assert!(frame.path.is_none());
        assert_eq!(frame.nearest.len(), 2);
    }

    #[test]
    fn test_recompute_is_independent() {
        let session = session();
        let first = TrackingSnapshot::new(PHILADELPHIA, Some(LONDON));
        let moved = first.with_position(GeoPoint::new(51.0, -1.0));

        let a = session.compute(&first);
        let _ = session.compute(&moved);
        assert_eq!(session.compute(&first), a);
        assert_eq!(session.compute(&moved).nearest[0].record.name, "EGLL");
    }

    #[test]
    fn test_default_settings() {
        let settings = TrackingSettings::default();
        assert_eq!(settings.nearest_count, 5);
        assert_eq!(settings.path_samples, 100);
    }

    #[test]
    fn test_select_destination() {
        let heathrow = AirportRecord::new("EGLL", GeoPoint::new(51.4706, -0.4619));
        assert_eq!(select_destination(&heathrow).unwrap(), heathrow.location);

        let on_meridian = AirportRecord::new("ZERO", GeoPoint::new(51.0, 0.0));
        assert_eq!(
            select_destination(&on_meridian).unwrap_err().code(),
            GeoErrorCode::InvalidDestination
        );

        let broken = AirportRecord::new("BAD", GeoPoint::new(95.0, 10.0));
        assert_eq!(
            select_destination(&broken).unwrap_err().code(),
            GeoErrorCode::InvalidCoordinate
        );
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot: TrackingSnapshot = serde_json::from_str(
            r#"{"current": {"latitude": 40.0, "longitude": -75.0}}"#,
        )
        .unwrap();
        assert_eq!(snapshot, TrackingSnapshot::new(PHILADELPHIA, None));
    }
}
