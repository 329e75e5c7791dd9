//! Failure taxonomy surfaced at the call boundary.

use thiserror::Error;

use crate::models::Zone;

/// Recoverable failure states.
///
/// None of these terminate the surrounding application; each degrades to a
/// well-defined unknown/undetermined output at the boundary where it occurs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeliveryError {
    /// The address could not be geocoded; the zone degrades to `Unknown`.
    #[error("address could not be resolved to a coordinate")]
    ResolutionFailure,

    /// The zone classified but no catalog method matches it.
    #[error("no delivery method is eligible for zone {0}")]
    NoEligibleMethod(Zone),

    /// Pricing produced no value; show "price on request", never 0.
    #[error("delivery price could not be determined")]
    PriceUndetermined,

    /// The expanding-radius search exhausted its ladder.
    #[error("no pickup points found within {max_radius_km} km")]
    NoPickupPointsFound { max_radius_km: f64 },
}
