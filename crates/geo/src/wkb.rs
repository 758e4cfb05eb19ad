//! Extended WKB point layout.
//!
//! A single point with an embedded SRID, little-endian throughout:
//!
//! | Offset | Length | Field                         |
//! |--------|--------|-------------------------------|
//! | 0      | 1      | byte order (`0x01`)           |
//! | 1      | 4      | type `0x20000001` (point+SRID)|
//! | 5      | 4      | SRID                          |
//! | 9      | 8      | X (longitude) as f64          |
//! | 17     | 8      | Y (latitude) as f64           |

use crate::{Coordinate, GeoError, Result};

/// SRID of WGS-84 geographic coordinates.
pub const WGS84_SRID: u32 = 4326;

/// Byte length of an encoded point.
pub const WKB_POINT_LEN: usize = 25;

/// Hex length of an encoded point.
pub const WKB_POINT_HEX_LEN: usize = WKB_POINT_LEN * 2;

/// Byte-order flag followed by the point-with-SRID type word, as hex.
pub const WKB_POINT_SRID_PREFIX: &str = "0101000020";

const LITTLE_ENDIAN: u8 = 0x01;
const POINT_WITH_SRID: u32 = 0x2000_0001;

const HEADER_HEX_LEN: usize = 18;
const ORDINATE_HEX_LEN: usize = 16;

/// Returns true if `hex` starts with the little-endian point-with-SRID prefix.
pub(crate) fn has_point_prefix(hex: &str) -> bool {
    hex.get(..WKB_POINT_SRID_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(WKB_POINT_SRID_PREFIX))
}

/// Reads 16 hex characters as a little-endian IEEE-754 double.
pub(crate) fn hex_to_f64_le(hex: &str) -> Result<f64> {
    if hex.len() != ORDINATE_HEX_LEN {
        return Err(GeoError::MalformedBinary(format!(
            "expected {} hex characters for an ordinate, got {}",
            ORDINATE_HEX_LEN,
            hex.len()
        )));
    }

    let mut buf = [0u8; 8];
    hex::decode_to_slice(hex, &mut buf)
        .map_err(|e| GeoError::MalformedBinary(format!("invalid ordinate {:?}: {}", hex, e)))?;

    Ok(f64::from_le_bytes(buf))
}

/// Reads the X/Y ordinates of a hex point.
///
/// The 9-byte header is skipped, not checked. Characters after the Y
/// ordinate are ignored. No range validation happens here.
pub(crate) fn read_point_hex(hex: &str) -> Result<Coordinate> {
    let x_end = HEADER_HEX_LEN + ORDINATE_HEX_LEN;
    let y_end = x_end + ORDINATE_HEX_LEN;

    let ordinate = |range: std::ops::Range<usize>, axis: &'static str| {
        hex.get(range).ok_or_else(|| {
            GeoError::MalformedBinary(format!(
                "{} ordinate missing: {} characters, need {}",
                axis,
                hex.len(),
                WKB_POINT_HEX_LEN
            ))
        })
    };

    let longitude = hex_to_f64_le(ordinate(HEADER_HEX_LEN..x_end, "X")?)?;
    let latitude = hex_to_f64_le(ordinate(x_end..y_end, "Y")?)?;

    Ok(Coordinate::new(latitude, longitude))
}

/// Writes a WGS-84 point as uppercase hex. Callers check finiteness.
pub(crate) fn write_point_hex(coord: &Coordinate) -> String {
    let mut buf = [0u8; WKB_POINT_LEN];
    buf[0] = LITTLE_ENDIAN;
    buf[1..5].copy_from_slice(&POINT_WITH_SRID.to_le_bytes());
    buf[5..9].copy_from_slice(&WGS84_SRID.to_le_bytes());
    buf[9..17].copy_from_slice(&coord.longitude.to_le_bytes());
    buf[17..25].copy_from_slice(&coord.latitude.to_le_bytes());

    hex::encode_upper(buf)
}
