//! Geospatial codec for the bus-tracking client.
//!
//! This crate provides:
//! - WKB point decoding/encoding (`0101000020...` hex as emitted by PostGIS)
//! - Format-tolerant location decoding (structured, hex, WKT, JSON text)
//! - PostGIS WKT/EWKT and GeoJSON parsing, route endpoint extraction
//! - Haversine distance and nearest-location ranking
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use bustrack_geo::{decode, encode, Coordinate, RawLocation};
//!
//! let hex = encode(21.0285, 105.8542).unwrap();
//! assert_eq!(hex.len(), 50);
//!
//! let coord = decode(RawLocation::Text(&hex));
//! assert_eq!(coord, Coordinate::new(21.0285, 105.8542));
//! ```

mod codec;
pub mod config;
mod distance;
mod error;
pub mod nearest;
mod postgis;
mod wkb;

#[cfg(feature = "wasm")]
mod wasm;

pub use codec::{decode, encode, try_decode, GeometryCodec, RawLocation};
pub use config::{GeoConfig, LoggingConfig};
pub use distance::{
    haversine_distance, haversine_distance_meters, is_within_tolerance, EARTH_RADIUS_KM,
    EARTH_RADIUS_M,
};
pub use error::{GeoError, GeoErrorCode, Result};
pub use nearest::{calculate_distances, nearest, within_radius, DistanceResult, LocatedItem};
pub use postgis::{
    parse_postgis_point, parse_wkt_linestring, parse_wkt_point, route_endpoints, to_ewkt, to_wkt,
    RouteEndpoints,
};
pub use wkb::{WGS84_SRID, WKB_POINT_HEX_LEN, WKB_POINT_LEN, WKB_POINT_SRID_PREFIX};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Fallback returned by [`decode`] when a location cannot be read.
    pub const ORIGIN: Coordinate = Coordinate {
        latitude: 0.0,
        longitude: 0.0,
    };

    /// Creates a new coordinate.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both ordinates are within WGS-84 bounds.
    ///
    /// NaN in either ordinate is never valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
