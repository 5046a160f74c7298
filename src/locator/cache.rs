//! File-based geocode cache at ~/.whisker/cache.json.
//!
//! Zip centroids are effectively static, so a long TTL (30 days) keeps the
//! public geocoder out of the hot path. Persistence is best-effort.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const CACHE_TTL_MS: i64 = 30 * 24 * 3600 * 1000; // 30 days in ms

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    latitude: f64,
    longitude: f64,
    timestamp: i64,
}

/// The zip → coordinate cache.
pub struct GeocodeCache {
    path: PathBuf,
    entries: HashMap<String, CacheEntry>,
}

impl GeocodeCache {
    /// Load from the default location (~/.whisker/cache.json).
    pub fn load() -> Self {
        let path = Self::default_path();
        let entries = Self::read_file(&path).unwrap_or_default();
        Self { path, entries }
    }

    /// Load from a specific path (for testing).
    pub fn load_from(path: PathBuf) -> Self {
        let entries = Self::read_file(&path).unwrap_or_default();
        Self { path, entries }
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".whisker")
            .join("cache.json")
    }

    fn read_file(path: &PathBuf) -> Option<HashMap<String, CacheEntry>> {
        let data = fs::read_to_string(path).ok()?;
        serde_json::from_str(&data).ok()
    }

    /// Look up a zip. Returns None if missing or expired.
    pub fn get(&self, zip: &str) -> Option<GeoPoint> {
        let entry = self.entries.get(zip)?;

        let now = chrono::Utc::now().timestamp_millis();
        if now - entry.timestamp > CACHE_TTL_MS {
            return None; // expired
        }

        Some(GeoPoint::new(entry.latitude, entry.longitude))
    }

    /// Store a resolved zip and persist to disk.
    pub fn put(&mut self, zip: &str, point: GeoPoint) {
        self.entries.insert(
            zip.to_string(),
            CacheEntry {
                latitude: point.latitude,
                longitude: point.longitude,
                timestamp: chrono::Utc::now().timestamp_millis(),
            },
        );
        self.persist();
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(&self.entries) {
            let _ = fs::write(&self.path, json);
        }
    }

    /// Number of entries (for testing).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
