//! Geo proximity resolution: postal-code geocoding, the hosted store's
//! radius RPC, and the finder that composes them.

pub mod cache;
pub mod finder;
pub mod geocode;
pub mod store;
pub mod types;

pub use cache::GeocodeCache;
pub use finder::{LocationFinder, DEFAULT_RADIUS_MILES};
pub use geocode::{is_valid_zip, resolve_postal_code};
pub use store::StoreClient;
pub use types::{LocatorError, ProximityResult};
