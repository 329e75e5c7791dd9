//! Delivery-method eligibility for a classified zone.

use tracing::debug;

use crate::models::{DeliveryMethod, Zone};

/// Methods whose zone constraint admits the classified zone.
///
/// A method with no requirement is always eligible. A method with a
/// requirement matches exactly its zone; for `Unknown` only requirement-free
/// methods survive (fail safe, not fail open).
pub fn eligible_methods<'a>(zone: Zone, methods: &'a [DeliveryMethod]) -> Vec<&'a DeliveryMethod> {
    methods
        .iter()
        .filter(|m| match m.zone_requirement {
            None => true,
            Some(required) => zone != Zone::Unknown && required == zone,
        })
        .collect()
}

/// How the current selection changed after a zone change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// A single survivor was selected automatically.
    AutoSelected(i64),
    /// The previous selection is still offered.
    Retained(i64),
    /// Several methods remain and none is selected; the caller must ask.
    ChoiceRequired,
    /// No method matches the zone. Actionable state, not an error.
    NoneEligible,
}

#[derive(Debug)]
pub struct EligibilityOutcome<'a> {
    pub eligible: Vec<&'a DeliveryMethod>,
    pub change: SelectionChange,
    /// Set when the previously selected method dropped out of eligibility;
    /// the caller surfaces "method no longer valid for this address".
    pub previous_invalidated: bool,
}

/// Re-evaluate the method selection after the zone changed.
pub fn reselect<'a>(
    zone: Zone,
    methods: &'a [DeliveryMethod],
    current: Option<i64>,
) -> EligibilityOutcome<'a> {
    let eligible = eligible_methods(zone, methods);

    let still_valid = current.filter(|id| eligible.iter().any(|m| m.id == *id));
    let previous_invalidated = current.is_some() && still_valid.is_none();
    if previous_invalidated {
        debug!(
            "selected method {:?} is no longer valid for zone {}",
            current, zone
        );
    }

    let change = if eligible.is_empty() {
        SelectionChange::NoneEligible
    } else if eligible.len() == 1 {
        SelectionChange::AutoSelected(eligible[0].id)
    } else if let Some(id) = still_valid {
        SelectionChange::Retained(id)
    } else {
        SelectionChange::ChoiceRequired
    };

    EligibilityOutcome {
        eligible,
        change,
        previous_invalidated,
    }
}
