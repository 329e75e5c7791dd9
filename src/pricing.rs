//! Delivery cost computation.
//!
//! Pricing is an ordered chain of pure rules evaluated in sequence; the
//! first rule that produces a cost wins. The order is part of the contract.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{DeliveryMethod, PricingPolicy, Zone};

/// Computed delivery cost.
///
/// `Undetermined` must surface as "price on request"; it is a different
/// user-facing state from a free delivery and must never collapse to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cost {
    Amount(Decimal),
    Undetermined,
}

impl Cost {
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Cost::Amount(amount) => Some(*amount),
            Cost::Undetermined => None,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Cost::Amount(amount) if amount.is_zero())
    }

    pub fn is_determined(&self) -> bool {
        matches!(self, Cost::Amount(_))
    }
}

type PricingRule = fn(&DeliveryMethod, Zone, Decimal) -> Option<Cost>;

const PRICING_RULES: &[PricingRule] = &[
    zone_table_rule,
    fixed_rule,
    percentage_rule,
    fixed_plus_percentage_rule,
    fallback_scalar_rule,
];

/// Delivery cost for a method in a zone, given the order subtotal.
pub fn delivery_cost(method: &DeliveryMethod, zone: Zone, subtotal: Decimal) -> Cost {
    let cost = PRICING_RULES
        .iter()
        .find_map(|rule| rule(method, zone, subtotal))
        .unwrap_or(Cost::Amount(Decimal::ZERO));

    // Costs are never negative, whatever the catalog data says.
    match cost {
        Cost::Amount(amount) if amount < Decimal::ZERO => Cost::Amount(Decimal::ZERO),
        other => other,
    }
}

/// Total order cost. An undetermined delivery cost contributes nothing here;
/// callers distinguish free from undetermined through the [`Cost`] value.
pub fn order_total(subtotal: Decimal, cost: Cost) -> Decimal {
    subtotal + cost.amount().unwrap_or(Decimal::ZERO)
}

fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn percentage_of(subtotal: Decimal, rate: Decimal) -> Decimal {
    round_half_up(subtotal * rate / Decimal::ONE_HUNDRED).max(Decimal::ZERO)
}

fn zone_table_rule(method: &DeliveryMethod, zone: Zone, _subtotal: Decimal) -> Option<Cost> {
    let PricingPolicy::ZoneTable { prices } = &method.pricing else {
        return None;
    };

    // A missing zone key means "price on request"; the fallback scalar is
    // never consulted implicitly.
    Some(
        prices
            .get(&zone)
            .copied()
            .map(Cost::Amount)
            .unwrap_or(Cost::Undetermined),
    )
}

fn fixed_rule(method: &DeliveryMethod, _zone: Zone, _subtotal: Decimal) -> Option<Cost> {
    let PricingPolicy::Fixed { amount } = method.pricing else {
        return None;
    };
    Some(Cost::Amount(amount))
}

fn percentage_rule(method: &DeliveryMethod, _zone: Zone, subtotal: Decimal) -> Option<Cost> {
    let PricingPolicy::Percentage { rate } = method.pricing else {
        return None;
    };
    Some(Cost::Amount(percentage_of(subtotal, rate)))
}

fn fixed_plus_percentage_rule(
    method: &DeliveryMethod,
    _zone: Zone,
    subtotal: Decimal,
) -> Option<Cost> {
    let PricingPolicy::FixedPlusPercentage { amount, rate } = method.pricing else {
        return None;
    };
    Some(Cost::Amount(amount + percentage_of(subtotal, rate)))
}

fn fallback_scalar_rule(method: &DeliveryMethod, _zone: Zone, _subtotal: Decimal) -> Option<Cost> {
    match method.fallback_price {
        Some(price) if price > Decimal::ZERO => Some(Cost::Amount(price)),
        _ => Some(Cost::Amount(Decimal::ZERO)),
    }
}
