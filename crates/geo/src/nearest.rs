//! Ranking buses and stops by distance from a location.
//!
//! Locations that cannot be parsed get an infinite distance. They are never
//! treated as sitting at the origin.

use crate::{haversine_distance, parse_postgis_point, Coordinate};
use serde::{Deserialize, Serialize};

/// A bus or stop with its location as received from the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocatedItem {
    /// Bus or stop ID
    pub id: i64,
    /// Location in any format [`parse_postgis_point`] accepts
    pub location: serde_json::Value,
}

/// Distance from the reference location to one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// The item ID
    pub id: i64,
    /// Distance in kilometers (Infinity if location is unreadable)
    pub distance_km: f64,
}

/// Distance from `origin` to every item, in input order.
///
/// # Example
/// ```
/// use bustrack_geo::{calculate_distances, Coordinate, LocatedItem};
/// use serde_json::json;
///
/// let items = vec![
///     LocatedItem { id: 1, location: json!("0101000020E61000009E996038D7755A40FE4465C39A063540") },
///     LocatedItem { id: 2, location: json!("POINT(105.8042 21.2187)") },
/// ];
///
/// let results = calculate_distances(&Coordinate::new(21.0288, 105.8525), &items);
/// assert_eq!(results.len(), 2);
/// ```
pub fn calculate_distances(origin: &Coordinate, items: &[LocatedItem]) -> Vec<DistanceResult> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items
            .par_iter()
            .map(|item| distance_to_item(origin, item))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items
            .iter()
            .map(|item| distance_to_item(origin, item))
            .collect()
    }
}

/// Items sorted closest first, optionally truncated to `limit`.
///
/// Unreadable locations sort last.
pub fn nearest(
    origin: &Coordinate,
    items: &[LocatedItem],
    limit: Option<usize>,
) -> Vec<DistanceResult> {
    let mut results = calculate_distances(origin, items);
    sort_by_distance(&mut results);

    if let Some(max) = limit {
        results.truncate(max);
    }

    results
}

/// Items within `radius_km` of `origin`, closest first.
pub fn within_radius(
    origin: &Coordinate,
    items: &[LocatedItem],
    radius_km: f64,
) -> Vec<DistanceResult> {
    let mut results = calculate_distances(origin, items);
    results.retain(|r| r.distance_km <= radius_km);
    sort_by_distance(&mut results);
    results
}

fn sort_by_distance(results: &mut [DistanceResult]) {
    results.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}

#[inline]
fn distance_to_item(origin: &Coordinate, item: &LocatedItem) -> DistanceResult {
    let distance_km = parse_postgis_point(&item.location)
        .map(|coord| haversine_distance(origin, &coord))
        .unwrap_or(f64::INFINITY);

    DistanceResult {
        id: item.id,
        distance_km,
    }
}
