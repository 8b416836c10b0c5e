//! Great-circle geodesy for live flight tracking.
//!
//! This crate provides:
//! - Haversine distance with antimeridian correction
//! - Great-circle path interpolation
//! - Nearest-airport ranking (optionally parallel)
//! - Airport dataset parsing with full or ranged scans
//! - Snapshot-based tracking frames
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use flightpath_geo::{distance, GeoPoint};
//!
//! let philadelphia = GeoPoint::new(40.0, -75.0);
//! let london = GeoPoint::new(51.5, -0.1);
//!
//! let distance_km = distance(philadelphia, london);
//! assert!((distance_km - 5687.7).abs() < 5.0);
//! ```

mod dataset;
mod error;
mod great_circle;
mod haversine;
pub mod nearest;
pub mod session;

#[cfg(feature = "wasm")]
mod wasm;

pub use dataset::{
    load_candidates, load_candidates_with_stats, AirportRecord, DatasetStats, ScanRange,
};
pub use error::{GeoError, GeoErrorCode, Result};
pub use great_circle::{
    interpolate, intermediate_point, midpoint, GreatCirclePath, DEFAULT_PATH_SAMPLES,
};
pub use haversine::{distance, distance_meters, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use nearest::{nearest, within_radius, RankedAirport, DEFAULT_NEAREST_COUNT};
pub use session::{
    select_destination, TrackingFrame, TrackingSession, TrackingSettings, TrackingSnapshot,
};

/// A geographic position in decimal degrees.
///
/// Equality is exact field equality; no tolerance is applied.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl GeoPoint {
    /// Position reported before any fix has been acquired.
    pub const SENTINEL: GeoPoint = GeoPoint { latitude: 0.0, longitude: 0.0 };

    /// Creates a new point without validation.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a new point, rejecting non-finite or out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let point = Self::new(latitude, longitude);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(GeoError::InvalidCoordinate(format!(
                "({latitude}, {longitude}) is not a finite position within [-90, 90] x [-180, 180]"
            )))
        }
    }

    /// Returns true if both fields are finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Returns true for the "no fix yet" position (0, 0).
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }

    /// Unit vector on the sphere (x towards 0°E, z towards the north pole).
    #[inline]
    pub(crate) fn to_unit_vector(self) -> [f64; 3] {
        let (lat, lon) = self.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }

    /// Inverse of [`GeoPoint::to_unit_vector`]; the vector need not be normalized.
    #[inline]
    pub(crate) fn from_vector([x, y, z]: [f64; 3]) -> Self {
        let latitude = z.atan2(x.hypot(y)).to_degrees();
        let longitude = y.atan2(x).to_degrees();
        Self::new(latitude, longitude)
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}
