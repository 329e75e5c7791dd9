//! Spatial index for zone boundary lookups.

use rstar::{RTree, RTreeObject, AABB};
use std::sync::Arc;
use tracing::info;

use super::ZoneBoundary;
use crate::models::GeoPoint;

/// Wrapper for R-tree indexing of zone boundaries
#[derive(Clone)]
pub struct IndexedBoundary {
    pub boundary: Arc<ZoneBoundary>,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedBoundary {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedBoundary {
    pub fn new(boundary: ZoneBoundary) -> Option<Self> {
        let (min_x, min_y, max_x, max_y) = boundary.bbox()?;
        Some(Self {
            boundary: Arc::new(boundary),
            envelope: AABB::from_corners([min_x, min_y], [max_x, max_y]),
        })
    }
}

/// R-tree over boundary envelopes; exact containment runs only on envelope
/// hits.
pub struct ZoneIndex {
    tree: RTree<IndexedBoundary>,
}

impl ZoneIndex {
    pub fn build(boundaries: Vec<ZoneBoundary>) -> Self {
        let indexed: Vec<IndexedBoundary> = boundaries
            .into_iter()
            .filter_map(IndexedBoundary::new)
            .collect();

        let tree = RTree::bulk_load(indexed);
        info!("Zone index built with {} boundaries", tree.size());

        Self { tree }
    }

    /// Find all boundaries containing a point
    pub fn lookup(&self, point: GeoPoint) -> Vec<Arc<ZoneBoundary>> {
        let query_envelope = AABB::from_point([point.lon, point.lat]);

        self.tree
            .locate_in_envelope_intersecting(&query_envelope)
            .filter(|ib| ib.boundary.contains(point))
            .map(|ib| Arc::clone(&ib.boundary))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ZoneTier;

    #[test]
    fn lookup_filters_envelope_hits_exactly() {
        // A diamond whose bounding box covers the unit square corners.
        let diamond = ZoneBoundary::new(
            ZoneTier::Inner,
            &[[0.5, 0.0], [1.0, 0.5], [0.5, 1.0], [0.0, 0.5]],
        )
        .unwrap();
        let index = ZoneIndex::build(vec![diamond]);

        // Centre is inside both the envelope and the diamond.
        assert_eq!(index.lookup(GeoPoint::new(0.5, 0.5)).len(), 1);
        // A corner is inside the envelope but outside the diamond.
        assert!(index.lookup(GeoPoint::new(0.05, 0.05)).is_empty());
    }

    #[test]
    fn empty_index_has_no_hits() {
        let index = ZoneIndex::build(vec![]);
        assert!(index.is_empty());
        assert!(index.lookup(GeoPoint::new(0.0, 0.0)).is_empty());
    }
}
