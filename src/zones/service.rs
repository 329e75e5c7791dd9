//! Zone classification service.

use anyhow::{Context, Result};
use tracing::debug;

use super::{ZoneBoundary, ZoneIndex};
use crate::config::BoundaryConfig;
use crate::models::{GeoPoint, Zone, ZoneTier};

/// Maps a destination coordinate to its delivery zone.
pub struct ZoneClassifier {
    index: ZoneIndex,
}

impl ZoneClassifier {
    pub fn new(index: ZoneIndex) -> Self {
        Self { index }
    }

    /// Build a classifier from injected boundary configuration.
    pub fn from_config(boundaries: &[BoundaryConfig]) -> Result<Self> {
        let mut built = Vec::with_capacity(boundaries.len());
        for config in boundaries {
            let boundary = ZoneBoundary::new(config.tier, &config.ring).with_context(|| {
                format!("boundary ring for {:?} tier needs at least 3 vertices", config.tier)
            })?;
            built.push(boundary);
        }
        Ok(Self::new(ZoneIndex::build(built)))
    }

    /// Classify a coordinate: inner boundary wins over outer, anything outside
    /// both is `Region`, and a missing coordinate is `Unknown`.
    pub fn classify(&self, coordinate: Option<GeoPoint>) -> Zone {
        let Some(point) = coordinate else {
            return Zone::Unknown;
        };

        let hits = self.index.lookup(point);
        let zone = if hits.iter().any(|b| b.tier == ZoneTier::Inner) {
            Zone::Mkad
        } else if hits.iter().any(|b| b.tier == ZoneTier::Outer) {
            Zone::Ckad
        } else {
            Zone::Region
        };

        debug!(
            "classified ({}, {}) as {} ({} boundary hits)",
            point.lat,
            point.lon,
            zone,
            hits.len()
        );
        zone
    }
}
