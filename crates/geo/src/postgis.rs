//! PostGIS text and GeoJSON geometry parsing.
//!
//! Supports:
//! - GeoJSON points: `{"type": "Point", "coordinates": [lng, lat]}`
//! - WKT/EWKT points: `POINT(lng lat)`, `SRID=4326;POINT(lng lat)`
//! - WKT/EWKT linestrings for route geometry
//! - WKB hex points, via the codec

use crate::wkb;
use crate::{Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};

/// First and last vertex of a route geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteEndpoints {
    pub start: Coordinate,
    pub end: Coordinate,
}

/// Parse a location from a JSON value without logging or fallback.
///
/// This is the lenient entry point for batch work, where an unreadable
/// location should be skipped rather than placed at the origin. Every
/// format is range-checked, structured objects included.
///
/// # Returns
/// * `Some(Coordinate)` if parsing succeeds
/// * `None` if the value is null or cannot be parsed
///
/// # Example
/// ```
/// use bustrack_geo::parse_postgis_point;
/// use serde_json::json;
///
/// let geojson = json!({"type": "Point", "coordinates": [105.8542, 21.0285]});
/// let coord = parse_postgis_point(&geojson).unwrap();
/// assert!((coord.latitude - 21.0285).abs() < 0.0001);
///
/// let ewkt = json!("SRID=4326;POINT(105.8542 21.0285)");
/// let coord = parse_postgis_point(&ewkt).unwrap();
/// assert!((coord.longitude - 105.8542).abs() < 0.0001);
/// ```
pub fn parse_postgis_point(value: &serde_json::Value) -> Option<Coordinate> {
    if value.is_null() {
        return None;
    }

    if value.is_object() {
        if let Some(coords) = value.get("coordinates").and_then(|c| c.as_array()) {
            if coords.len() >= 2 {
                let lng = coords[0].as_f64()?;
                let lat = coords[1].as_f64()?;
                return Some(Coordinate::new(lat, lng)).filter(Coordinate::is_valid);
            }
        }
    }

    crate::try_decode(value).ok().filter(Coordinate::is_valid)
}

/// Returns true if `text` looks like a WKT or EWKT point.
pub(crate) fn looks_like_wkt_point(text: &str) -> bool {
    let text = text.trim();
    let body = match strip_srid(text) {
        Ok(Some((_, body))) => body,
        _ => text,
    };
    starts_with_keyword(body, "POINT")
}

/// Parse a WKT or EWKT POINT string.
///
/// Format: `[SRID=n;]POINT(longitude latitude)`
pub fn parse_wkt_point(wkt: &str) -> Result<Coordinate> {
    let wkt = wkt.trim();
    let body = strip_srid(wkt)?.map_or(wkt, |(_, body)| body);

    let inner = geometry_body(body, "POINT")?;
    parse_position(inner)
}

/// Parse a WKT or EWKT LINESTRING into its vertices.
///
/// Format: `[SRID=n;]LINESTRING(lng lat, lng lat, ...)`, at least two vertices.
pub fn parse_wkt_linestring(wkt: &str) -> Result<Vec<Coordinate>> {
    let wkt = wkt.trim();
    let body = strip_srid(wkt)?.map_or(wkt, |(_, body)| body);

    let inner = geometry_body(body, "LINESTRING")?;
    let points = inner
        .split(',')
        .map(parse_position)
        .collect::<Result<Vec<_>>>()?;

    if points.len() < 2 {
        return Err(GeoError::InvalidWkt(format!(
            "LINESTRING needs at least 2 points, got {}",
            points.len()
        )));
    }

    Ok(points)
}

/// Start and end of a route linestring.
pub fn route_endpoints(wkt: &str) -> Result<RouteEndpoints> {
    let points = parse_wkt_linestring(wkt)?;
    // parse_wkt_linestring guarantees two or more points
    let start = points[0];
    let end = points[points.len() - 1];
    Ok(RouteEndpoints { start, end })
}

/// Formats a coordinate as `POINT(lng lat)`.
pub fn to_wkt(coord: &Coordinate) -> String {
    format!("POINT({} {})", coord.longitude, coord.latitude)
}

/// Formats a coordinate as `SRID=n;POINT(lng lat)`.
pub fn to_ewkt(coord: &Coordinate, srid: u32) -> String {
    format!("SRID={};{}", srid, to_wkt(coord))
}

/// Splits an optional `SRID=n;` prefix.
///
/// `Ok(None)` when there is no prefix, an error when the prefix is present
/// but malformed.
fn strip_srid(text: &str) -> Result<Option<(u32, &str)>> {
    let Some(rest) = text
        .get(..5)
        .filter(|head| head.eq_ignore_ascii_case("SRID="))
        .map(|_| &text[5..])
    else {
        return Ok(None);
    };

    let (srid, body) = rest
        .split_once(';')
        .ok_or_else(|| GeoError::InvalidWkt(format!("Missing ';' after SRID: {}", text)))?;
    let srid = srid
        .trim()
        .parse::<u32>()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid SRID: {}", srid)))?;

    if srid != wkb::WGS84_SRID {
        tracing::debug!(srid, "EWKT uses a non WGS-84 SRID");
    }

    Ok(Some((srid, body.trim_start())))
}

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.get(..keyword.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
}

/// Returns the text between the parentheses of `KEYWORD(...)`.
fn geometry_body<'a>(text: &'a str, keyword: &str) -> Result<&'a str> {
    if !starts_with_keyword(text, keyword) {
        return Err(GeoError::InvalidWkt(format!(
            "Expected {}, got: {}",
            keyword, text
        )));
    }

    let rest = text[keyword.len()..].trim_start();
    let inner = rest
        .strip_prefix('(')
        .ok_or_else(|| GeoError::InvalidWkt("Missing '('".into()))?;
    let end = inner
        .rfind(')')
        .ok_or_else(|| GeoError::InvalidWkt("Missing ')'".into()))?;

    if !inner[end + 1..].trim().is_empty() {
        return Err(GeoError::InvalidWkt(format!(
            "Unexpected text after geometry: {}",
            text
        )));
    }

    Ok(&inner[..end])
}

/// Parses `lng lat` into a coordinate.
fn parse_position(text: &str) -> Result<Coordinate> {
    let parts: Vec<&str> = text.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(GeoError::InvalidWkt(format!(
            "Expected 2 coordinates, got {}",
            parts.len()
        )));
    }

    let lng: f64 = parts[0]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid longitude: {}", parts[0])))?;
    let lat: f64 = parts[1]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid latitude: {}", parts[1])))?;

    Ok(Coordinate::new(lat, lng))
}
