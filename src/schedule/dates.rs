//! Offerable delivery dates.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{DeliveryMethod, MethodKind};

/// Relative delivery-date option. Rendered to an absolute date only at the
/// presentation edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryDateOption {
    Today,
    Tomorrow,
    Plus2,
    Plus3,
    Plus4,
    Plus5,
    Plus6,
}

impl DeliveryDateOption {
    /// All options in offset order.
    pub fn all() -> &'static [DeliveryDateOption] {
        &[
            DeliveryDateOption::Today,
            DeliveryDateOption::Tomorrow,
            DeliveryDateOption::Plus2,
            DeliveryDateOption::Plus3,
            DeliveryDateOption::Plus4,
            DeliveryDateOption::Plus5,
            DeliveryDateOption::Plus6,
        ]
    }

    pub fn offset_days(&self) -> i64 {
        match self {
            DeliveryDateOption::Today => 0,
            DeliveryDateOption::Tomorrow => 1,
            DeliveryDateOption::Plus2 => 2,
            DeliveryDateOption::Plus3 => 3,
            DeliveryDateOption::Plus4 => 4,
            DeliveryDateOption::Plus5 => 5,
            DeliveryDateOption::Plus6 => 6,
        }
    }

    /// Calendar date this option lands on, relative to "now".
    pub fn resolve(&self, now: NaiveDateTime) -> NaiveDate {
        now.date() + Duration::days(self.offset_days())
    }
}

/// Ordered list of offerable delivery dates for a method.
pub fn available_dates(method: &DeliveryMethod, now: NaiveDateTime) -> Vec<DeliveryDateOption> {
    let cap = window_cap(method);
    let mut options: Vec<DeliveryDateOption> = DeliveryDateOption::all()
        .iter()
        .copied()
        .filter(|option| *option <= cap)
        .filter(|option| is_deliverable(method, *option, now))
        .collect();

    if !method.schedule.weekend_delivery {
        options.retain(|option| !is_weekend(option.resolve(now)));
        options = weekend_remap(options, now.date().weekday());
    }

    options.sort();
    options.dedup();
    options
}

/// Latest option a method may offer. Locker networks take extended
/// scheduling; everything else stops at plus2.
fn window_cap(method: &DeliveryMethod) -> DeliveryDateOption {
    match method.kind {
        MethodKind::LockerNetwork => DeliveryDateOption::Plus6,
        _ => DeliveryDateOption::Plus2,
    }
}

/// Whether one date option is deliverable at "now".
///
/// With a flexible transition time the method is in "early" mode strictly
/// before it (today deliverable, tomorrow not) and in "late" mode at or
/// after it (the reverse). Without one, the fixed cutoff gates today,
/// tomorrow is always deliverable, and farther options require the method
/// to be active.
fn is_deliverable(
    method: &DeliveryMethod,
    option: DeliveryDateOption,
    now: NaiveDateTime,
) -> bool {
    use DeliveryDateOption::{Today, Tomorrow};

    match option {
        Today | Tomorrow => match method.schedule.flexible_transition {
            Some(transition) => {
                let early = now.time() < transition;
                (option == Today) == early
            }
            None => option == Tomorrow || now.time() <= method.schedule.cutoff,
        },
        _ => method.is_active,
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Historical day-of-week remap for weekend-suppressed methods, applied
/// after weekend-landing dates are dropped. Reproduced as-is from the
/// operator rules; confirm with the product owner before layering holiday
/// handling on top.
fn weekend_remap(
    mut options: Vec<DeliveryDateOption>,
    placed_on: Weekday,
) -> Vec<DeliveryDateOption> {
    use DeliveryDateOption::{Plus2, Plus3, Today};

    match placed_on {
        // The third slot goes away outright.
        Weekday::Fri => options.retain(|option| *option != Plus2),
        // Saturday orders get exactly the next Monday and Tuesday.
        Weekday::Sat => return vec![Plus2, Plus3],
        Weekday::Sun => options.retain(|option| *option != Today),
        _ => {}
    }

    options
}
