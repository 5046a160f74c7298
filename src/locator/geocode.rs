//! Postal-code geocoding via the public Zippopotam lookup.
//!
//! Contract: HTTP GET, JSON body carrying at least one place with
//! numeric-string lat/long fields. Anything else — network failure, non-200,
//! malformed payload — resolves to None; callers render "no results".

use super::types::LocatorError;
use crate::geo::GeoPoint;
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = "WhiskerAtlas/0.3 (directory-backend)";

#[derive(Deserialize)]
struct ZippopotamResponse {
    #[serde(default)]
    places: Vec<ZippopotamPlace>,
}

#[derive(Deserialize)]
struct ZippopotamPlace {
    latitude: String,
    longitude: String,
}

/// Strict 5-digit US postal code check.
pub fn is_valid_zip(zip: &str) -> bool {
    zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit())
}

/// Resolve a 5-digit US postal code to a coordinate. Never fails loudly.
pub fn resolve_postal_code(zip: &str) -> Option<GeoPoint> {
    match fetch_postal_code(zip) {
        Ok(point) => Some(point),
        Err(e) => {
            eprintln!("  Warning: geocoding '{}' failed: {}", zip, e);
            None
        }
    }
}

fn fetch_postal_code(zip: &str) -> Result<GeoPoint, LocatorError> {
    if !is_valid_zip(zip) {
        return Err(LocatorError::InvalidPostalCode(zip.to_string()));
    }

    let url = format!("https://api.zippopotam.us/us/{}", zip);
    let response = ureq::get(&url)
        .set("User-Agent", USER_AGENT)
        .timeout(Duration::from_secs(5))
        .call()
        .map_err(|e| LocatorError::Network(e.to_string()))?;

    let body: ZippopotamResponse = response
        .into_json()
        .map_err(|e| LocatorError::InvalidResponse(e.to_string()))?;

    point_from_response(body)
}

fn point_from_response(body: ZippopotamResponse) -> Result<GeoPoint, LocatorError> {
    let place = body
        .places
        .into_iter()
        .next()
        .ok_or_else(|| LocatorError::InvalidResponse("no places in payload".into()))?;

    let latitude: f64 = place
        .latitude
        .parse()
        .map_err(|_| LocatorError::InvalidResponse(format!("bad latitude '{}'", place.latitude)))?;
    let longitude: f64 = place.longitude.parse().map_err(|_| {
        LocatorError::InvalidResponse(format!("bad longitude '{}'", place.longitude))
    })?;

    let point = GeoPoint::new(latitude, longitude);
    if !point.is_valid() {
        return Err(LocatorError::InvalidResponse(format!(
            "out-of-range coordinates {}, {}",
            latitude, longitude
        )));
    }
    Ok(point)
}
