//! Geographic primitives: coordinates and delivery zones.

use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon), in finite floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Delivery zone a destination coordinate classifies into.
///
/// `Mkad` is inside the inner ring boundary, `Ckad` inside the outer boundary
/// but outside the inner one, `Region` outside both. `Unknown` means no
/// coordinate was available to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Mkad,
    Ckad,
    Region,
    Unknown,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::Mkad => write!(f, "mkad"),
            Zone::Ckad => write!(f, "ckad"),
            Zone::Region => write!(f, "region"),
            Zone::Unknown => write!(f, "unknown"),
        }
    }
}

/// Boundary tier a configured ring polygon belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneTier {
    /// The inner ring road boundary.
    Inner,
    /// The outer ring road boundary.
    Outer,
}

impl ZoneTier {
    /// Zone assigned to a point that falls inside this tier (and no tier
    /// nested deeper).
    pub fn zone(&self) -> Zone {
        match self {
            ZoneTier::Inner => Zone::Mkad,
            ZoneTier::Outer => Zone::Ckad,
        }
    }
}
