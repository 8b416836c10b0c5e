//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
///
/// The distance, path and ranking functions never fail; these errors come
/// from validation at the edges (point construction, destination choice,
/// JSON payloads).
#[derive(Debug, Error)]
pub enum GeoError {
    /// Non-finite or out-of-range coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Destination that cannot be chosen from the selection list
    #[error("Invalid destination: {0}")]
    InvalidDestination(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Numeric error codes for callers that report errors across a boundary.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Non-finite or out-of-range coordinate values
    InvalidCoordinate = 10002,
    /// JSON parsing error
    JsonParsing = 10003,
    /// Destination rejected by the selection policy
    InvalidDestination = 10004,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::InvalidDestination(_) => GeoErrorCode::InvalidDestination,
            GeoError::JsonError(_) => GeoErrorCode::JsonParsing,
        }
    }
}
