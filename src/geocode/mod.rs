//! Address resolution adapter over the external geocoding service.
//!
//! The core depends only on the [`AddressResolver`] trait and its candidate
//! type; the HTTP client is one implementation of it.

mod client;

pub use client::GeocoderClient;

use async_trait::async_trait;

use crate::models::GeoPoint;

/// One geocoder candidate for a free-text address.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAddress {
    pub coordinate: GeoPoint,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
}

/// Maps a free-text address to candidate coordinates, ordered by the
/// external service's confidence.
///
/// Every failure mode (no candidates, service error, caller-imposed timeout)
/// yields an empty list, never an error; downstream a missing coordinate
/// degrades to `Zone::Unknown`.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Vec<ResolvedAddress>;

    /// Highest-confidence candidate. The full list serves the
    /// suggestion/autocomplete surface outside this core.
    async fn resolve_first(&self, query: &str) -> Option<ResolvedAddress> {
        self.resolve(query).await.into_iter().next()
    }
}
