//! Dovoz - delivery availability, pricing and scheduling engine
//!
//! Computes, for a shopping order, which delivery methods are eligible for a
//! destination, what each costs, which dates and time windows are offerable,
//! and which pickup points are reachable from the customer's address.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod geocode;
pub mod models;
pub mod pickup;
pub mod pricing;
pub mod quote;
pub mod schedule;
pub mod zones;

pub use error::DeliveryError;
pub use models::{DeliveryMethod, GeoPoint, MethodKind, PickupPoint, PricingPolicy, Zone};
pub use pricing::Cost;
pub use quote::QuoteService;
pub use schedule::{DeliveryDateOption, TimeInterval};
