//! Pickup-point distance search.
//!
//! Resolves candidate coordinates through a fallback chain (directory
//! record, shared cache, geocoder), ranks by great-circle distance and
//! searches over an expanding radius ladder.

mod cache;
mod locator;

pub use cache::{CoordinateStore, MemoryStore, SledStore};
pub use locator::{
    PickupLocator, SearchOutcome, SearchPhase, SearchResult, RADIUS_LADDER_KM,
};
