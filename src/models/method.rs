//! Delivery-method catalog types.
//!
//! These are read-only snapshots supplied by the external catalog service;
//! the core never mutates them.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::Zone;

/// Kind of delivery a method performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    /// Customer collects at the store.
    Pickup,
    /// Courier to the door.
    Courier,
    /// Parcel locker / pickup-point network.
    LockerNetwork,
    /// Same-day express courier.
    Express,
}

/// Pricing policy attached to a delivery method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PricingPolicy {
    /// Flat amount, 0 means free.
    Fixed { amount: Decimal },
    /// Percentage of the order subtotal.
    Percentage { rate: Decimal },
    /// Flat amount plus a percentage of the subtotal.
    FixedPlusPercentage { amount: Decimal, rate: Decimal },
    /// Amount keyed by the classified delivery zone.
    ZoneTable { prices: HashMap<Zone, Decimal> },
    /// No policy configured; the fallback scalar price applies if present.
    Undetermined,
}

/// Half-open clock range, e.g. 10:00-12:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Scheduling rules for a delivery method: cutoffs, flexible early/late
/// interval lists and the weekend policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRules {
    /// Single transition clock-time switching the method between "early" and
    /// "late" mode. When absent the fixed `cutoff` applies instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flexible_transition: Option<NaiveTime>,

    /// Intervals offered while in early mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub early_slots: Vec<TimeSlot>,

    /// Intervals offered while in late mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub late_slots: Vec<TimeSlot>,

    /// Operator-entered free-form interval labels, at most two. When present
    /// they are returned verbatim and suppress every generated source.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_labels: Vec<String>,

    /// Whether the method delivers on Saturday/Sunday.
    #[serde(default = "default_weekend_delivery")]
    pub weekend_delivery: bool,

    /// Fixed same-day cutoff used when no flexible transition is defined.
    #[serde(default = "default_cutoff")]
    pub cutoff: NaiveTime,
}

fn default_weekend_delivery() -> bool {
    true
}

/// Historical same-day cutoff.
fn default_cutoff() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 50, 0).expect("literal clock time")
}

impl Default for ScheduleRules {
    fn default() -> Self {
        Self {
            flexible_transition: None,
            early_slots: Vec::new(),
            late_slots: Vec::new(),
            custom_labels: Vec::new(),
            weekend_delivery: default_weekend_delivery(),
            cutoff: default_cutoff(),
        }
    }
}

/// A delivery method from the external catalog snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryMethod {
    /// Catalog identifier.
    pub id: i64,

    /// Operator-facing name.
    pub name: String,

    /// Kind of delivery performed.
    pub kind: MethodKind,

    /// Inactive methods stay listed but cannot take far-out dates.
    pub is_active: bool,

    /// Pricing policy.
    pub pricing: PricingPolicy,

    /// When set, the method is offered in exactly this zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_requirement: Option<Zone>,

    /// Scheduling rules.
    #[serde(default)]
    pub schedule: ScheduleRules,

    /// Scalar price consulted only when no pricing policy matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_price: Option<Decimal>,
}

impl DeliveryMethod {
    /// Create a method with minimal required fields.
    pub fn new(id: i64, name: &str, kind: MethodKind) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            is_active: true,
            pricing: PricingPolicy::Undetermined,
            zone_requirement: None,
            schedule: ScheduleRules::default(),
            fallback_price: None,
        }
    }
}
