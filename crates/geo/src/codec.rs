//! Location decoding and encoding for API payloads.
//!
//! Location fields arrive in several shapes: a `{latitude, longitude}`
//! object, a WKB hex string straight from PostGIS, WKT text, a JSON string,
//! or nothing at all. [`RawLocation`] names those shapes and
//! [`GeometryCodec`] turns them into a [`Coordinate`].
//!
//! [`GeometryCodec::decode`] never fails: anything unreadable becomes
//! [`Coordinate::ORIGIN`] and a log event. Use [`GeometryCodec::try_decode`]
//! to tell a failure apart from a real point at 0,0.

use crate::postgis::{looks_like_wkt_point, parse_wkt_point};
use crate::wkb;
use crate::{Coordinate, GeoError, Result};
use serde_json::Value;
use tracing::{debug, error, warn};

/// A location field as received from the API, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawLocation<'a> {
    /// Null or absent
    Missing,
    /// Already a `{latitude, longitude}` pair
    Structured(Coordinate),
    /// Hex WKB, WKT, or JSON text
    Text(&'a str),
    /// Any other JSON value
    Unsupported(&'a Value),
}

impl<'a> From<&'a Value> for RawLocation<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => RawLocation::Missing,
            Value::String(text) => RawLocation::Text(text),
            Value::Object(_) => match structured_coordinate(value) {
                Some(coord) => RawLocation::Structured(coord),
                None => RawLocation::Unsupported(value),
            },
            other => RawLocation::Unsupported(other),
        }
    }
}

impl<'a> From<Option<&'a Value>> for RawLocation<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        value.map_or(RawLocation::Missing, RawLocation::from)
    }
}

impl<'a> From<&'a str> for RawLocation<'a> {
    fn from(text: &'a str) -> Self {
        RawLocation::Text(text)
    }
}

impl From<Coordinate> for RawLocation<'_> {
    fn from(coord: Coordinate) -> Self {
        RawLocation::Structured(coord)
    }
}

/// Reads numeric `latitude` and `longitude` fields from a JSON object.
fn structured_coordinate(value: &Value) -> Option<Coordinate> {
    let latitude = value.get("latitude")?.as_f64()?;
    let longitude = value.get("longitude")?.as_f64()?;
    Some(Coordinate::new(latitude, longitude))
}

/// Converts between API location fields and [`Coordinate`].
///
/// Encoded points always carry SRID 4326: ordinates are WGS-84 degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryCodec;

impl GeometryCodec {
    /// Decodes a location, falling back to [`Coordinate::ORIGIN`].
    ///
    /// Missing input is logged as a warning, every other failure as an
    /// error carrying the raw value.
    pub fn decode<'a>(&self, input: impl Into<RawLocation<'a>>) -> Coordinate {
        let input = input.into();
        match self.try_decode(input) {
            Ok(coord) => coord,
            Err(GeoError::MissingInput) => {
                warn!("Location missing, using origin");
                Coordinate::ORIGIN
            }
            Err(err) => {
                error!(
                    code = err.code() as u32,
                    input = ?input,
                    error = %err,
                    "Failed to decode location, using origin"
                );
                Coordinate::ORIGIN
            }
        }
    }

    /// Decodes a location, reporting why it could not be read.
    ///
    /// Structured input is passed through without range checks.
    pub fn try_decode<'a>(&self, input: impl Into<RawLocation<'a>>) -> Result<Coordinate> {
        match input.into() {
            RawLocation::Missing => Err(GeoError::MissingInput),
            RawLocation::Structured(coord) => Ok(coord),
            RawLocation::Text(text) => decode_text(text),
            RawLocation::Unsupported(value) => Err(GeoError::UnrecognizedFormat(value.to_string())),
        }
    }

    /// Encodes a coordinate as 50 uppercase hex characters of extended WKB
    /// with SRID 4326.
    ///
    /// # Errors
    /// Returns [`GeoError::NonFiniteOrdinate`] for NaN or infinite input.
    /// Range is not checked.
    pub fn encode(&self, latitude: f64, longitude: f64) -> Result<String> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(GeoError::NonFiniteOrdinate {
                latitude,
                longitude,
            });
        }
        Ok(wkb::write_point_hex(&Coordinate::new(latitude, longitude)))
    }
}

fn decode_text(text: &str) -> Result<Coordinate> {
    if wkb::has_point_prefix(text) {
        debug!(len = text.len(), "Decoding WKB hex location");
        let coord = wkb::read_point_hex(text)?;
        return validated(coord, text);
    }

    if looks_like_wkt_point(text) {
        debug!("Decoding WKT location");
        let coord = parse_wkt_point(text)?;
        return validated(coord, text);
    }

    match serde_json::from_str::<Value>(text) {
        Ok(value) => structured_coordinate(&value)
            .ok_or_else(|| GeoError::UnrecognizedFormat(text.to_string())),
        Err(_) => Err(GeoError::UnrecognizedFormat(text.to_string())),
    }
}

fn validated(coord: Coordinate, raw: &str) -> Result<Coordinate> {
    if coord.is_valid() {
        Ok(coord)
    } else {
        Err(GeoError::OutOfRange {
            latitude: coord.latitude,
            longitude: coord.longitude,
            raw: raw.to_string(),
        })
    }
}

/// See [`GeometryCodec::decode`].
pub fn decode<'a>(input: impl Into<RawLocation<'a>>) -> Coordinate {
    GeometryCodec.decode(input)
}

/// See [`GeometryCodec::try_decode`].
pub fn try_decode<'a>(input: impl Into<RawLocation<'a>>) -> Result<Coordinate> {
    GeometryCodec.try_decode(input)
}

/// See [`GeometryCodec::encode`].
pub fn encode(latitude: f64, longitude: f64) -> Result<String> {
    GeometryCodec.encode(latitude, longitude)
}
