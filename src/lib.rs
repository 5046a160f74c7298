//! Whisker Atlas backend core.
//!
//! The directory site renders cat-cafe listings by state and city; this crate
//! holds the two pieces with actual logic behind those pages: timezone-aware
//! open-status evaluation for weekly schedules ([`hours`]) and postal-code /
//! coordinate radius search against the hosted store's spatial RPC
//! ([`locator`]). Both degrade to negative results on failure so pages render
//! a uniform "closed" / "no results" state instead of an error.

pub mod geo;
pub mod hours;
pub mod locator;
pub mod server;
pub mod timezone;
