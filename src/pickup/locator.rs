//! Expanding-radius pickup-point search.

use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

use super::cache::CoordinateStore;
use crate::error::DeliveryError;
use crate::geocode::AddressResolver;
use crate::models::{GeoPoint, PickupPoint, RankedPickupPoint};
use crate::zones::haversine_km;

/// Expanding search ladder, in kilometres. The smallest rung containing at
/// least one point wins; no larger rung is attempted after that.
pub const RADIUS_LADDER_KM: [f64; 11] = [
    5.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0,
];

/// Progress of a single search. Only the terminal [`SearchOutcome`] is
/// authoritative; this exists so a UI can render "searching".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    ResolvingDestination,
    ResolvingCandidates,
    Ranking,
    Done,
    Failed,
}

/// Terminal state of one search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(SearchResult),
    /// The destination could not be resolved to a coordinate.
    DestinationUnresolved,
    /// Every ladder rung came up empty.
    Exhausted { max_radius_km: f64, excluded: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Points within the chosen radius, nearest first.
    pub points: Vec<RankedPickupPoint>,
    /// Ladder rung that produced the result. For UI disclosure, not
    /// decision-making.
    pub radius_km: f64,
    /// Candidates excluded for lack of a resolvable coordinate.
    pub excluded: usize,
}

impl SearchOutcome {
    pub fn into_result(self) -> Result<SearchResult, DeliveryError> {
        match self {
            SearchOutcome::Found(result) => Ok(result),
            SearchOutcome::DestinationUnresolved => Err(DeliveryError::ResolutionFailure),
            SearchOutcome::Exhausted { max_radius_km, .. } => {
                Err(DeliveryError::NoPickupPointsFound { max_radius_km })
            }
        }
    }
}

/// Ranks directory-supplied pickup points by distance from a destination.
pub struct PickupLocator {
    resolver: Arc<dyn AddressResolver>,
    cache: Arc<dyn CoordinateStore>,
}

impl PickupLocator {
    pub fn new(resolver: Arc<dyn AddressResolver>, cache: Arc<dyn CoordinateStore>) -> Self {
        Self { resolver, cache }
    }

    /// Search without progress reporting.
    pub async fn locate(
        &self,
        destination: &str,
        destination_coordinate: Option<GeoPoint>,
        candidates: Vec<PickupPoint>,
    ) -> SearchOutcome {
        self.locate_with_progress(destination, destination_coordinate, candidates, |_| {})
            .await
    }

    /// Search, reporting each phase transition to `progress`.
    pub async fn locate_with_progress(
        &self,
        destination: &str,
        destination_coordinate: Option<GeoPoint>,
        candidates: Vec<PickupPoint>,
        mut progress: impl FnMut(SearchPhase),
    ) -> SearchOutcome {
        progress(SearchPhase::ResolvingDestination);
        let destination = match destination_coordinate {
            Some(coordinate) => coordinate,
            None => match self.resolver.resolve_first(destination).await {
                Some(resolved) => resolved.coordinate,
                None => {
                    warn!(
                        "cannot determine destination coordinate for {:?}",
                        destination
                    );
                    progress(SearchPhase::Failed);
                    return SearchOutcome::DestinationUnresolved;
                }
            },
        };

        progress(SearchPhase::ResolvingCandidates);
        let mut ranked = Vec::with_capacity(candidates.len());
        let mut excluded = 0usize;
        for point in candidates {
            match self.resolve_point(&point).await {
                Some(coordinate) => {
                    let distance_km = haversine_km(destination, coordinate);
                    ranked.push(RankedPickupPoint {
                        point,
                        coordinate,
                        distance_km,
                    });
                }
                None => {
                    debug!("excluded {} - no coordinate", point.code);
                    excluded += 1;
                }
            }
        }
        if excluded > 0 {
            warn!(
                "{} pickup point(s) excluded for lack of a coordinate",
                excluded
            );
        }

        progress(SearchPhase::Ranking);
        let chosen_radius = RADIUS_LADDER_KM
            .iter()
            .copied()
            .find(|radius| ranked.iter().any(|p| p.distance_km <= *radius));

        let Some(radius_km) = chosen_radius else {
            progress(SearchPhase::Failed);
            return SearchOutcome::Exhausted {
                max_radius_km: RADIUS_LADDER_KM[RADIUS_LADDER_KM.len() - 1],
                excluded,
            };
        };

        let mut points: Vec<RankedPickupPoint> = ranked
            .into_iter()
            .filter(|p| p.distance_km <= radius_km)
            .collect();
        // Distance order, point code as a deterministic tie-break.
        points.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.point.code.cmp(&b.point.code))
        });

        debug!(
            "found {} pickup point(s) within {} km",
            points.len(),
            radius_km
        );
        progress(SearchPhase::Done);
        SearchOutcome::Found(SearchResult {
            points,
            radius_km,
            excluded,
        })
    }

    /// Coordinate fallback chain: the directory record, then the shared
    /// cache, then the geocoder (populating the cache on success).
    async fn resolve_point(&self, point: &PickupPoint) -> Option<GeoPoint> {
        if let Some(coordinate) = point.coordinate {
            return Some(coordinate);
        }

        if let Some(coordinate) = self.cache.get(&point.code) {
            return Some(coordinate);
        }

        let resolved = self.resolver.resolve_first(&point.address).await?;
        self.cache.put(&point.code, resolved.coordinate);
        Some(resolved.coordinate)
    }
}
