//! Location finder — composes the search pipeline.
//!
//! Zip flow:   cache → Zippopotam geocode → store radius RPC
//! Point flow: store radius RPC directly
//!
//! Deliberate policy: a failed geocode or radius query degrades to an empty
//! result set, never an error surfaced to the end user.

use super::cache::GeocodeCache;
use super::geocode;
use super::store::StoreClient;
use super::types::ProximityResult;
use crate::geo::GeoPoint;
use crate::hours::WeeklyHourEntry;

/// Default search radius for zip and coordinate queries.
pub const DEFAULT_RADIUS_MILES: f64 = 25.0;

/// The finder with its geocode cache and optional store handle.
pub struct LocationFinder {
    cache: GeocodeCache,
    store: Option<StoreClient>,
    offline: bool,
}

impl LocationFinder {
    pub fn new(store: Option<StoreClient>) -> Self {
        Self {
            cache: GeocodeCache::load(),
            store,
            offline: false,
        }
    }

    /// Create a finder with a specific cache (for testing).
    pub fn with_cache(store: Option<StoreClient>, cache: GeocodeCache) -> Self {
        Self {
            cache,
            store,
            offline: false,
        }
    }

    /// Offline mode — skip all network calls, serve cache hits only.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Resolve a zip to a coordinate through cache then geocoder.
    pub fn resolve_zip(&mut self, zip: &str) -> Option<GeoPoint> {
        if let Some(point) = self.cache.get(zip) {
            return Some(point);
        }
        if self.offline {
            return None;
        }
        let point = geocode::resolve_postal_code(zip)?;
        self.cache.put(zip, point);
        Some(point)
    }

    /// Radius search keyed by postal code. Geocoding failure yields an empty
    /// result set, not an error.
    pub fn search_by_zip(
        &mut self,
        zip: &str,
        radius_miles: f64,
        exclude_ids: &[String],
    ) -> Vec<ProximityResult> {
        let Some(point) = self.resolve_zip(zip) else {
            return Vec::new();
        };
        self.search_near(point, radius_miles, exclude_ids)
    }

    /// Radius search from an explicit coordinate (device location).
    pub fn search_near(
        &self,
        point: GeoPoint,
        radius_miles: f64,
        exclude_ids: &[String],
    ) -> Vec<ProximityResult> {
        if self.offline {
            return Vec::new();
        }
        match &self.store {
            Some(store) => store.locations_within_radius(point, radius_miles, exclude_ids),
            None => {
                eprintln!("  Warning: no store configured, radius search returns nothing");
                Vec::new()
            }
        }
    }

    /// A location's weekly schedule from the store (empty when unavailable).
    pub fn hours_for(&self, location_id: &str) -> Vec<WeeklyHourEntry> {
        if self.offline {
            return Vec::new();
        }
        match &self.store {
            Some(store) => store.location_hours(location_id),
            None => Vec::new(),
        }
    }
}
