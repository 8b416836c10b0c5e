//! WASM bindings for the geo crate.
//!
//! These bindings let the browser map view call the engine directly. Lists
//! cross the boundary as JSON strings.

use crate::{
    interpolate, load_candidates, nearest, AirportRecord, GeoPoint, ScanRange, TrackingSession,
    TrackingSettings, TrackingSnapshot,
};
use wasm_bindgen::prelude::*;

fn to_js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

fn parse_airports(airports_json: &str) -> Result<Vec<AirportRecord>, JsValue> {
    serde_json::from_str(airports_json).map_err(|e| to_js_error("JSON parse error", e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| to_js_error("JSON serialize error", e))
}

/// Great-circle distance in kilometers between two positions.
#[wasm_bindgen]
pub fn distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    crate::distance(GeoPoint::new(lat1, lon1), GeoPoint::new(lat2, lon2))
}

/// Route polyline as a JSON `[[lat, lon], ...]` string.
#[wasm_bindgen]
pub fn great_circle_path(
    lat1: f64,
    lon1: f64,
    lat2: f64,
    lon2: f64,
    num_points: u32,
) -> Result<String, JsValue> {
    let path = interpolate(
        GeoPoint::new(lat1, lon1),
        GeoPoint::new(lat2, lon2),
        num_points as usize,
    );
    to_json(&path)
}

/// Parses the airport CSV text and returns the records as JSON.
///
/// Omitting both bounds scans the whole text; otherwise lines `start..end`,
/// where a missing `start` is 0 and a missing `end` is the end of the text.
#[wasm_bindgen]
pub fn load_airports(csv: &str, start: Option<u32>, end: Option<u32>) -> Result<String, JsValue> {
    let scan = ScanRange::from_bounds(start.map(|s| s as usize), end.map(|e| e as usize));
    to_json(&load_candidates(csv, scan))
}

/// The `k` nearest airports to a position, as JSON.
#[wasm_bindgen]
pub fn nearest_airports(lat: f64, lon: f64, airports_json: &str, k: u32) -> Result<String, JsValue> {
    let airports = parse_airports(airports_json)?;
    to_json(&nearest(GeoPoint::new(lat, lon), &airports, k as usize))
}

/// Full tracking frame for a snapshot, as JSON.
///
/// `snapshot_json` is `{"current": {...}, "destination": {...} | null}`.
#[wasm_bindgen]
pub fn tracking_frame(snapshot_json: &str, airports_json: &str) -> Result<String, JsValue> {
    let snapshot: TrackingSnapshot =
        serde_json::from_str(snapshot_json).map_err(|e| to_js_error("JSON parse error", e))?;
    let session = TrackingSession::new(parse_airports(airports_json)?, TrackingSettings::default());
    to_json(&session.compute(&snapshot))
}
