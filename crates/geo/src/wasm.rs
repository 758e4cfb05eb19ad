//! WASM bindings for the geo crate.
//!
//! Lets the map client decode API locations and encode bus positions
//! without a JavaScript port of the codec.

use crate::{decode, encode, haversine_distance, nearest, Coordinate, LocatedItem};
use wasm_bindgen::prelude::*;

fn js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

/// Decode a location field to `{"latitude": .., "longitude": ..}`.
///
/// `input` is the raw field text: WKB hex, WKT, or JSON. An empty string
/// counts as missing. Never throws; unreadable input yields the origin.
#[wasm_bindgen(js_name = decodeLocation)]
pub fn decode_location(input: &str) -> String {
    let coord = if input.is_empty() {
        decode(None::<&serde_json::Value>)
    } else {
        decode(input)
    };
    serde_json::json!({
        "latitude": coord.latitude,
        "longitude": coord.longitude
    })
    .to_string()
}

/// Encode a position as 50-character uppercase WKB hex.
#[wasm_bindgen(js_name = encodeLocation)]
pub fn encode_location(latitude: f64, longitude: f64) -> Result<String, JsValue> {
    encode(latitude, longitude).map_err(|e| js_error(e.to_string()))
}

/// Distance between two coordinates in kilometers.
#[wasm_bindgen(js_name = distanceKm)]
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    haversine_distance(&Coordinate::new(lat1, lng1), &Coordinate::new(lat2, lng2))
}

/// Rank buses or stops by distance.
///
/// # Arguments
/// * `items_json` - JSON array of `{id, location}` objects
/// * `max_results` - Maximum results to return (0 for all)
///
/// # Returns
/// JSON array of `{id, distance_km}`, closest first
#[wasm_bindgen(js_name = nearestLocations)]
pub fn nearest_locations(
    latitude: f64,
    longitude: f64,
    items_json: &str,
    max_results: u32,
) -> Result<String, JsValue> {
    let items: Vec<LocatedItem> = serde_json::from_str(items_json)
        .map_err(|e| js_error(format!("JSON parse error: {}", e)))?;

    let limit = if max_results == 0 {
        None
    } else {
        Some(max_results as usize)
    };
    let results = nearest(&Coordinate::new(latitude, longitude), &items, limit);

    serde_json::to_string(&results).map_err(|e| js_error(format!("JSON serialize error: {}", e)))
}
