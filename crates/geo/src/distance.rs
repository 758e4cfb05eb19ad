//! Great-circle distance between decoded locations.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two coordinates in kilometers.
///
/// # Example
/// ```
/// use bustrack_geo::{haversine_distance, Coordinate};
///
/// let hoan_kiem = Coordinate::new(21.0288, 105.8525);
/// let noi_bai = Coordinate::new(21.2187, 105.8042);
///
/// let km = haversine_distance(&hoan_kiem, &noi_bai);
/// assert!((km - 21.6).abs() < 1.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_KM
}

/// Haversine distance between two coordinates in meters.
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_M
}

/// Returns true if `to` lies within `tolerance_meters` of `from`.
///
/// Point-to-point only, e.g. whether a bus has arrived at a stop.
#[inline]
pub fn is_within_tolerance(from: &Coordinate, to: &Coordinate, tolerance_meters: f64) -> bool {
    haversine_distance_meters(from, to) <= tolerance_meters
}

/// Angle subtended at the Earth's center, in radians.
fn central_angle(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let half_d_lat = (lat2 - lat1) / 2.0;
    let half_d_lon = (lon2 - lon1) / 2.0;

    let h = half_d_lat.sin().powi(2) + lat1.cos() * lat2.cos() * half_d_lon.sin().powi(2);

    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOAN_KIEM: Coordinate = Coordinate::new(21.0288, 105.8525);
    const NOI_BAI: Coordinate = Coordinate::new(21.2187, 105.8042);
    const HO_CHI_MINH_CITY: Coordinate = Coordinate::new(10.7769, 106.7009);

    #[test]
    fn test_hanoi_to_saigon() {
        let km = haversine_distance(&HOAN_KIEM, &HO_CHI_MINH_CITY);
        // ~1,140 km as the crow flies
        assert!((km - 1140.0).abs() < 15.0, "Hanoi-Saigon: {}", km);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert!(haversine_distance(&NOI_BAI, &NOI_BAI).abs() < 1e-9);
    }

    #[test]
    fn test_symmetry() {
        let d1 = haversine_distance(&HOAN_KIEM, &NOI_BAI);
        let d2 = haversine_distance(&NOI_BAI, &HOAN_KIEM);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_meters_conversion() {
        let km = haversine_distance(&HOAN_KIEM, &NOI_BAI);
        let meters = haversine_distance_meters(&HOAN_KIEM, &NOI_BAI);
        assert!((meters - km * 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_tolerance() {
        // ~111 m north
        let nearby = Coordinate::new(HOAN_KIEM.latitude + 0.001, HOAN_KIEM.longitude);
        assert!(is_within_tolerance(&HOAN_KIEM, &nearby, 150.0));
        assert!(!is_within_tolerance(&HOAN_KIEM, &nearby, 100.0));
    }
}
