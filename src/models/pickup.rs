//! Pickup-point directory records.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// A pickup point as supplied by the external directory per search query.
///
/// The directory gives no guarantee that `coordinate` is present; absent
/// coordinates are resolved through the cache/geocoder fallback chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupPoint {
    /// Directory code, stable across queries; used as the cache key.
    pub code: String,

    pub name: String,

    /// Free-text address as the directory stores it.
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<GeoPoint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PickupPoint {
    pub fn new(code: &str, name: &str, address: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            coordinate: None,
            working_hours: None,
            notes: None,
        }
    }
}

/// A pickup point annotated with its resolved coordinate and the great-circle
/// distance from the search destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPickupPoint {
    pub point: PickupPoint,
    pub coordinate: GeoPoint,
    pub distance_km: f64,
}
