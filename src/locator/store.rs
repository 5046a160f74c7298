//! Client for the hosted store's remote procedures.
//!
//! The store owns the spatial filter: `locations_within_radius` takes a
//! center point plus radius and returns rows annotated with distance. This
//! module owns only the call contract and graceful degradation — errors
//! collapse to empty results, logged to stderr.

use super::types::{LocatorError, ProximityResult};
use crate::geo::GeoPoint;
use crate::hours::WeeklyHourEntry;
use serde::Serialize;
use std::time::Duration;

const USER_AGENT: &str = "WhiskerAtlas/0.3 (directory-backend)";

const ENV_STORE_URL: &str = "WHISKER_STORE_URL";
const ENV_STORE_KEY: &str = "WHISKER_STORE_KEY";

#[derive(Serialize)]
struct RadiusParams<'a> {
    search_lat: f64,
    search_lng: f64,
    radius_miles: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude_ids: Option<&'a [String]>,
}

/// Hosted-store REST/RPC client.
pub struct StoreClient {
    base_url: String,
    api_key: String,
}

impl StoreClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Build a client from `WHISKER_STORE_URL` / `WHISKER_STORE_KEY`.
    pub fn from_env() -> Result<Self, LocatorError> {
        let base_url = std::env::var(ENV_STORE_URL)
            .map_err(|_| LocatorError::NotConfigured(format!("{} not set", ENV_STORE_URL)))?;
        let api_key = std::env::var(ENV_STORE_KEY)
            .map_err(|_| LocatorError::NotConfigured(format!("{} not set", ENV_STORE_KEY)))?;
        Ok(Self::new(&base_url, &api_key))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All locations within `radius_miles` of `point`, distance-annotated by
    /// the store. Any failure degrades to an empty vec.
    pub fn locations_within_radius(
        &self,
        point: GeoPoint,
        radius_miles: f64,
        exclude_ids: &[String],
    ) -> Vec<ProximityResult> {
        match self.call_radius_rpc(point, radius_miles, exclude_ids) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("  Warning: radius query failed: {}", e);
                Vec::new()
            }
        }
    }

    fn call_radius_rpc(
        &self,
        point: GeoPoint,
        radius_miles: f64,
        exclude_ids: &[String],
    ) -> Result<Vec<ProximityResult>, LocatorError> {
        let url = format!("{}/rest/v1/rpc/locations_within_radius", self.base_url);
        let params = RadiusParams {
            search_lat: point.latitude,
            search_lng: point.longitude,
            radius_miles,
            exclude_ids: if exclude_ids.is_empty() {
                None
            } else {
                Some(exclude_ids)
            },
        };

        let response = ureq::post(&url)
            .set("User-Agent", USER_AGENT)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .timeout(Duration::from_secs(8))
            .send_json(&params)
            .map_err(|e| LocatorError::Network(e.to_string()))?;

        response
            .into_json()
            .map_err(|e| LocatorError::InvalidResponse(e.to_string()))
    }

    /// A location's weekly schedule rows. Missing or failing reads degrade
    /// to an empty schedule, which the hours evaluator treats as closed.
    pub fn location_hours(&self, location_id: &str) -> Vec<WeeklyHourEntry> {
        match self.fetch_hours(location_id) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("  Warning: hours fetch for '{}' failed: {}", location_id, e);
                Vec::new()
            }
        }
    }

    fn fetch_hours(&self, location_id: &str) -> Result<Vec<WeeklyHourEntry>, LocatorError> {
        let url = format!(
            "{}/rest/v1/location_hours?location_id=eq.{}&select=dayOfWeek,openTime,closeTime,isClosed",
            self.base_url, location_id
        );

        let response = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .timeout(Duration::from_secs(8))
            .call()
            .map_err(|e| LocatorError::Network(e.to_string()))?;

        response
            .into_json()
            .map_err(|e| LocatorError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = StoreClient::new("https://store.example.com/", "key");
        assert_eq!(client.base_url(), "https://store.example.com");
        let client = StoreClient::new("https://store.example.com", "key");
        assert_eq!(client.base_url(), "https://store.example.com");
    }

    #[test]
    fn test_radius_params_wire_shape() {
        let exclude = vec!["abc".to_string()];
        let params = RadiusParams {
            search_lat: 32.78,
            search_lng: -79.93,
            radius_miles: 25.0,
            exclude_ids: Some(&exclude),
        };
        let v = serde_json::to_value(&params).unwrap();
        assert_eq!(v["search_lat"], 32.78);
        assert_eq!(v["search_lng"], -79.93);
        assert_eq!(v["radius_miles"], 25.0);
        assert_eq!(v["exclude_ids"][0], "abc");
    }

    #[test]
    fn test_radius_params_omit_empty_exclusions() {
        let params = RadiusParams {
            search_lat: 0.0,
            search_lng: 0.0,
            radius_miles: 10.0,
            exclude_ids: None,
        };
        let v = serde_json::to_value(&params).unwrap();
        assert!(v.get("exclude_ids").is_none());
    }

    #[test]
    fn test_result_row_parsing() {
        let json = r#"[{
            "id": "loc-1", "name": "Purrfect Brew", "slug": "purrfect-brew",
            "city": "Charleston", "state": "South Carolina",
            "latitude": 32.78, "longitude": -79.93, "distance_miles": 3.2
        }]"#;
        let rows: Vec<ProximityResult> = serde_json::from_str(json).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "loc-1");
        assert!((rows[0].distance_miles - 3.2).abs() < 1e-9);
        assert!(rows[0].address.is_none());
    }
}
