//! Core data models for the delivery computation engine.

pub mod geo;
pub mod method;
pub mod pickup;

pub use geo::{GeoPoint, Zone, ZoneTier};
pub use method::{DeliveryMethod, MethodKind, PricingPolicy, ScheduleRules, TimeSlot};
pub use pickup::{PickupPoint, RankedPickupPoint};
