//! Airport dataset parsing.
//!
//! The dataset is plain text: one airport per line, `name,latitude,longitude`,
//! no header and no quoting. Rows whose coordinates do not parse as finite
//! numbers are dropped without error.

use crate::GeoPoint;
use serde::{Deserialize, Serialize};

/// A named airport position from the reference dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    /// Airport name as written in the first column (may be empty)
    #[serde(default)]
    pub name: String,
    /// Airport position
    #[serde(flatten)]
    pub location: GeoPoint,
}

impl AirportRecord {
    /// Creates a new record.
    pub fn new(name: impl Into<String>, location: GeoPoint) -> Self {
        Self { name: name.into(), location }
    }
}

/// Which lines of the dataset to scan.
///
/// ```toml
/// selection_scan = "full"
/// selection_scan = { lines = { start = 35000, end = 36000 } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanRange {
    /// Every line of the text
    #[default]
    Full,
    /// Lines `start..end` (zero-based, end exclusive); clamped to the text
    Lines { start: usize, end: usize },
}

impl ScanRange {
    /// Window used by the destination selection list.
    pub const SELECTION_DEFAULT: ScanRange = ScanRange::Lines { start: 35_000, end: 36_000 };

    /// Scan from optional bounds: no bounds at all is a full scan, a missing
    /// `start` is line 0 and a missing `end` runs to the end of the text.
    pub fn from_bounds(start: Option<usize>, end: Option<usize>) -> Self {
        match (start, end) {
            (None, None) => ScanRange::Full,
            (start, end) => ScanRange::Lines {
                start: start.unwrap_or(0),
                end: end.unwrap_or(usize::MAX),
            },
        }
    }

    fn bounds(self) -> (usize, usize) {
        match self {
            ScanRange::Full => (0, usize::MAX),
            ScanRange::Lines { start, end } => (start, end.saturating_sub(start)),
        }
    }
}

/// Counters from a dataset scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    /// Lines visited
    pub rows_scanned: usize,
    /// Lines that produced a record
    pub kept: usize,
    /// Lines discarded for missing or non-numeric coordinates
    pub dropped: usize,
}

/// Parses the airports found in `scan` lines of `raw`.
///
/// # Example
/// ```
/// use flightpath_geo::{load_candidates, ScanRange};
///
/// let airports = load_candidates("KXYZ,40.0,-75.0\nbad,row\n", ScanRange::Full);
/// assert_eq!(airports.len(), 1);
/// assert_eq!(airports[0].name, "KXYZ");
/// ```
pub fn load_candidates(raw: &str, scan: ScanRange) -> Vec<AirportRecord> {
    load_candidates_with_stats(raw, scan).0
}

/// Like [`load_candidates`], also reporting how many rows were kept or dropped.
pub fn load_candidates_with_stats(raw: &str, scan: ScanRange) -> (Vec<AirportRecord>, DatasetStats) {
    let (skip, take) = scan.bounds();
    let mut stats = DatasetStats::default();

    let records: Vec<AirportRecord> = raw
        .split('\n')
        .skip(skip)
        .take(take)
        .filter_map(|line| {
            stats.rows_scanned += 1;
            let record = parse_row(line);
            match record {
                Some(_) => stats.kept += 1,
                None => stats.dropped += 1,
            }
            record
        })
        .collect();

    (records, stats)
}

/// Parses a single `name,latitude,longitude` row.
fn parse_row(line: &str) -> Option<AirportRecord> {
    let mut fields = line.split(',');
    let name = fields.next().unwrap_or_default();
    let latitude = parse_coordinate(fields.next()?)?;
    let longitude = parse_coordinate(fields.next()?)?;

    Some(AirportRecord::new(name, GeoPoint::new(latitude, longitude)))
}

#[inline]
fn parse_coordinate(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_valid_row() {
        let airports = load_candidates("KXYZ,40.0,-75.0", ScanRange::Full);
        assert_eq!(
            airports,
            vec![AirportRecord::new("KXYZ", GeoPoint::new(40.0, -75.0))]
        );
    }

    #[test]
    fn test_short_row_is_dropped() {
        assert!(load_candidates("bad,row", ScanRange::Full).is_empty());
    }

    #[test]
    fn test_malformed_rows_are_dropped() {
        let raw = "name,latitude_deg,longitude_deg\n\
                   EGLL,51.4706,-0.461941\n\
                   NAN1,NaN,10.0\n\
                   INF1,inf,10.0\n\
                   ,12.5,13.5\n\
                   KJFK,40.639751,-73.778925,extra\n\
                   \n";
        let (airports, stats) = load_candidates_with_stats(raw, ScanRange::Full);

        let names: Vec<_> = airports.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["EGLL", "", "KJFK"]);
        assert_eq!(stats, DatasetStats { rows_scanned: 8, kept: 3, dropped: 5 });
    }

    #[test]
    fn test_crlf_lines() {
        let airports = load_candidates("A,1.5,2.5\r\nB,3.5,4.5\r\n", ScanRange::Full);
        assert_eq!(airports.len(), 2);
        assert_eq!(airports[1].location, GeoPoint::new(3.5, 4.5));
    }

    #[test]
    fn test_line_range() {
        let raw = "A,1,1\nB,2,2\nC,3,3\nD,4,4\n";
        let airports = load_candidates(raw, ScanRange::Lines { start: 1, end: 3 });
        let names: Vec<_> = airports.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_line_range_is_clamped() {
        let raw = "A,1,1\nB,2,2\n";
        assert!(load_candidates(raw, ScanRange::SELECTION_DEFAULT).is_empty());
        assert_eq!(load_candidates(raw, ScanRange::Lines { start: 1, end: 99 }).len(), 1);
        assert!(load_candidates(raw, ScanRange::Lines { start: 2, end: 1 }).is_empty());
    }

    #[test]
    fn test_record_json_is_flat() {
        let record = AirportRecord::new("KXYZ", GeoPoint::new(40.0, -75.0));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "KXYZ", "latitude": 40.0, "longitude": -75.0})
        );

        let back: AirportRecord =
            serde_json::from_str(r#"{"latitude": 1.0, "longitude": 2.0}"#).unwrap();
        assert_eq!(back.name, "");
    }

    #[test]
    fn test_scan_range_from_bounds() {
        assert_eq!(ScanRange::from_bounds(None, None), ScanRange::Full);
        assert_eq!(
            ScanRange::from_bounds(Some(0), Some(0)),
            ScanRange::Lines { start: 0, end: 0 }
        );

        let raw = "A,1,1\nB,2,2\nC,3,3\n";
        assert!(load_candidates(raw, ScanRange::from_bounds(Some(0), Some(0))).is_empty());
        assert_eq!(load_candidates(raw, ScanRange::from_bounds(Some(1), None)).len(), 2);
        assert_eq!(load_candidates(raw, ScanRange::from_bounds(None, Some(1))).len(), 1);
    }

    #[test]
    fn test_scan_range_config_forms() {
        #[derive(Deserialize)]
        struct Wrapper {
            scan: ScanRange,
        }

        let full: Wrapper = toml::from_str(r#"scan = "full""#).unwrap();
        assert_eq!(full.scan, ScanRange::Full);

        let lines: Wrapper =
            toml::from_str("scan = { lines = { start = 35000, end = 36000 } }").unwrap();
        assert_eq!(lines.scan, ScanRange::SELECTION_DEFAULT);
    }
}
