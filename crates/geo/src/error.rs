//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur while reading or writing locations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Location was null or absent
    #[error("Location is missing")]
    MissingInput,

    /// Text matched none of the known location formats
    #[error("Unrecognized location format: {0}")]
    UnrecognizedFormat(String),

    /// WKB hex could not be split into ordinates
    #[error("Malformed WKB geometry: {0}")]
    MalformedBinary(String),

    /// Decoded ordinates are NaN or outside WGS-84 bounds
    #[error("Coordinate out of range: latitude={latitude}, longitude={longitude} (from {raw})")]
    OutOfRange {
        latitude: f64,
        longitude: f64,
        raw: String,
    },

    /// Encode was given NaN or an infinite ordinate
    #[error("Cannot encode non-finite coordinate: latitude={latitude}, longitude={longitude}")]
    NonFiniteOrdinate { latitude: f64, longitude: f64 },

    /// Invalid WKT format
    #[error("Invalid WKT format: {0}")]
    InvalidWkt(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error code for integration with the client's error reporting.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    MissingInput = 10001,
    UnrecognizedFormat = 10002,
    MalformedBinary = 10003,
    OutOfRange = 10004,
    NonFiniteOrdinate = 10005,
    InvalidWkt = 10006,
    JsonParsing = 10007,
    Config = 10008,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::MissingInput => GeoErrorCode::MissingInput,
            GeoError::UnrecognizedFormat(_) => GeoErrorCode::UnrecognizedFormat,
            GeoError::MalformedBinary(_) => GeoErrorCode::MalformedBinary,
            GeoError::OutOfRange { .. } => GeoErrorCode::OutOfRange,
            GeoError::NonFiniteOrdinate { .. } => GeoErrorCode::NonFiniteOrdinate,
            GeoError::InvalidWkt(_) => GeoErrorCode::InvalidWkt,
            GeoError::Json(_) => GeoErrorCode::JsonParsing,
            GeoError::Config(_) => GeoErrorCode::Config,
        }
    }
}
