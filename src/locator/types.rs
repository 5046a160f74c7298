//! Core types for the locator subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location row returned by the store's radius RPC, annotated with the
/// store-computed great-circle distance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximityResult {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_miles: f64,
}

/// Locator failures. These stay internal plumbing: the public search surface
/// collapses them to empty results so pages render a uniform "not found".
#[derive(Debug)]
pub enum LocatorError {
    Network(String),
    InvalidResponse(String),
    InvalidPostalCode(String),
    NotConfigured(String),
}

impl fmt::Display for LocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
            Self::InvalidPostalCode(zip) => write!(f, "Invalid postal code: '{}'", zip),
            Self::NotConfigured(what) => write!(f, "Store not configured: {}", what),
        }
    }
}

impl std::error::Error for LocatorError {}
