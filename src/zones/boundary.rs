//! Zone boundary rings and the containment test.

use geo::{BoundingRect, Coord, LineString, Polygon};

use crate::models::{GeoPoint, ZoneTier};

/// Nudge added to the query latitude so the horizontal ray never runs exactly
/// through a vertex or along an edge. On-boundary points are an accepted
/// approximation, not exact computational geometry.
const RAY_EPSILON: f64 = 1e-9;

/// A single boundary ring polygon with its tier.
#[derive(Debug, Clone)]
pub struct ZoneBoundary {
    pub tier: ZoneTier,
    ring: Polygon<f64>,
}

impl ZoneBoundary {
    /// Build a boundary from ordered (longitude, latitude) vertices.
    ///
    /// The ring is closed if the input does not repeat its first vertex.
    /// Returns `None` for degenerate rings with fewer than 3 vertices.
    pub fn new(tier: ZoneTier, vertices: &[[f64; 2]]) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }

        let mut ring: Vec<Coord<f64>> = vertices
            .iter()
            .map(|v| Coord { x: v[0], y: v[1] })
            .collect();

        if ring.first() != ring.last() {
            ring.push(ring[0]);
        }

        Some(Self {
            tier,
            ring: Polygon::new(LineString::new(ring), vec![]),
        })
    }

    /// Get the bounding box of this boundary
    pub fn bbox(&self) -> Option<(f64, f64, f64, f64)> {
        self.ring
            .bounding_rect()
            .map(|rect| (rect.min().x, rect.min().y, rect.max().x, rect.max().y))
    }

    /// Ray-casting crossing-number test: count the ring edges a horizontal
    /// ray from the point crosses; an odd count means inside.
    pub fn contains(&self, point: GeoPoint) -> bool {
        let x = point.lon;
        let y = point.lat + RAY_EPSILON;

        let mut inside = false;
        for edge in self.ring.exterior().0.windows(2) {
            let (a, b) = (edge[0], edge[1]);
            if (a.y > y) != (b.y > y) {
                let x_cross = a.x + (y - a.y) / (b.y - a.y) * (b.x - a.x);
                if x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> ZoneBoundary {
        ZoneBoundary::new(
            ZoneTier::Inner,
            &[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
        )
        .unwrap()
    }

    #[test]
    fn contains_interior_point() {
        assert!(unit_square().contains(GeoPoint::new(0.5, 0.5)));
    }

    #[test]
    fn excludes_exterior_points() {
        let square = unit_square();
        assert!(!square.contains(GeoPoint::new(0.5, 1.5)));
        assert!(!square.contains(GeoPoint::new(-0.5, 0.5)));
        assert!(!square.contains(GeoPoint::new(2.0, 2.0)));
    }

    #[test]
    fn handles_concave_ring() {
        // L-shaped ring: the notch at the top right is outside.
        let ring = ZoneBoundary::new(
            ZoneTier::Outer,
            &[
                [0.0, 0.0],
                [2.0, 0.0],
                [2.0, 1.0],
                [1.0, 1.0],
                [1.0, 2.0],
                [0.0, 2.0],
            ],
        )
        .unwrap();

        assert!(ring.contains(GeoPoint::new(0.5, 0.5)));
        assert!(ring.contains(GeoPoint::new(1.5, 0.5)));
        assert!(!ring.contains(GeoPoint::new(1.5, 1.5)));
    }

    #[test]
    fn closes_open_rings() {
        let square = unit_square();
        let (min_x, min_y, max_x, max_y) = square.bbox().unwrap();
        assert_eq!((min_x, min_y, max_x, max_y), (0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn rejects_degenerate_rings() {
        assert!(ZoneBoundary::new(ZoneTier::Inner, &[[0.0, 0.0], [1.0, 1.0]]).is_none());
    }
}
