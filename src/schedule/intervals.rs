//! Offerable time intervals for a chosen delivery date.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use super::DeliveryDateOption;
use crate::models::{DeliveryMethod, MethodKind, TimeSlot};

/// A presented time interval: a generated clock range or a free-form
/// operator label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeInterval {
    Slot(TimeSlot),
    Custom(String),
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeInterval::Slot(slot) => write!(f, "{}", slot),
            TimeInterval::Custom(label) => write!(f, "{}", label),
        }
    }
}

/// Operator labels are capped at two entries.
const MAX_CUSTOM_LABELS: usize = 2;

/// Last moment a same-day delivery may end.
fn closing_time() -> NaiveTime {
    NaiveTime::from_hms_opt(19, 0, 0).expect("literal clock time")
}

/// Shortest same-day window worth synthesizing.
const MIN_SYNTHESIZED_WINDOW_MIN: i64 = 30;

type IntervalSource =
    fn(&DeliveryMethod, DeliveryDateOption, NaiveDateTime) -> Option<Vec<TimeInterval>>;

/// Sources in priority order. The first non-empty result is returned as-is,
/// never merged with lower-priority sources.
const INTERVAL_SOURCES: &[IntervalSource] = &[custom_source, flexible_source, standard_source];

/// Ordered list of offerable time intervals for one delivery date.
pub fn available_intervals(
    method: &DeliveryMethod,
    date: DeliveryDateOption,
    now: NaiveDateTime,
) -> Vec<TimeInterval> {
    INTERVAL_SOURCES
        .iter()
        .find_map(|source| source(method, date, now))
        .unwrap_or_default()
}

/// Operator-entered labels, verbatim.
fn custom_source(
    method: &DeliveryMethod,
    _date: DeliveryDateOption,
    _now: NaiveDateTime,
) -> Option<Vec<TimeInterval>> {
    let labels = &method.schedule.custom_labels;
    if labels.is_empty() {
        return None;
    }

    Some(
        labels
            .iter()
            .take(MAX_CUSTOM_LABELS)
            .cloned()
            .map(TimeInterval::Custom)
            .collect(),
    )
}

/// Flexible early/late lists. Today picks the list by the transition test;
/// any other date takes the early list.
fn flexible_source(
    method: &DeliveryMethod,
    date: DeliveryDateOption,
    now: NaiveDateTime,
) -> Option<Vec<TimeInterval>> {
    let rules = &method.schedule;

    let early = match rules.flexible_transition {
        Some(transition) => now.time() < transition,
        None => true,
    };

    let slots = if date == DeliveryDateOption::Today && !early {
        &rules.late_slots
    } else {
        &rules.early_slots
    };
    if slots.is_empty() {
        return None;
    }

    Some(slots.iter().copied().map(TimeInterval::Slot).collect())
}

/// Generated standard blocks: two-hour windows from 10:00 to 18:00 plus the
/// trailing 18:00-19:00 block.
fn standard_blocks() -> Vec<TimeSlot> {
    let mut blocks: Vec<TimeSlot> = (10..18)
        .step_by(2)
        .map(|hour| TimeSlot::new(hm(hour, 0), hm(hour + 2, 0)))
        .collect();
    blocks.push(TimeSlot::new(hm(18, 0), closing_time()));
    blocks
}

fn standard_source(
    method: &DeliveryMethod,
    date: DeliveryDateOption,
    now: NaiveDateTime,
) -> Option<Vec<TimeInterval>> {
    let blocks = standard_blocks();

    if date != DeliveryDateOption::Today {
        return Some(blocks.into_iter().map(TimeInterval::Slot).collect());
    }

    let time = now.time();

    if method.kind == MethodKind::Pickup {
        // Pickup keeps every block that has not fully elapsed; the customer
        // may collect at any point inside the window.
        let remaining: Vec<TimeInterval> = blocks
            .into_iter()
            .filter(|block| block.end > time)
            .map(TimeInterval::Slot)
            .collect();
        return if remaining.is_empty() {
            None
        } else {
            Some(remaining)
        };
    }

    // Couriers take whole windows only.
    let remaining: Vec<TimeInterval> = blocks
        .into_iter()
        .filter(|block| block.start >= time)
        .map(TimeInterval::Slot)
        .collect();
    if !remaining.is_empty() {
        return Some(remaining);
    }

    // Late same-day order: a single synthesized window up to closing, if
    // enough of the day is left.
    let closing = closing_time();
    if closing.signed_duration_since(time) >= Duration::minutes(MIN_SYNTHESIZED_WINDOW_MIN) {
        let start = ceil_to_minute(time);
        return Some(vec![TimeInterval::Slot(TimeSlot::new(start, closing))]);
    }

    None
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("literal clock time")
}

fn ceil_to_minute(time: NaiveTime) -> NaiveTime {
    let secs = time.num_seconds_from_midnight();
    let rounded = secs.div_ceil(60) * 60;
    NaiveTime::from_num_seconds_from_midnight_opt(rounded, 0).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
    }

    fn courier() -> DeliveryMethod {
        DeliveryMethod::new(1, "Courier", MethodKind::Courier)
    }

    fn pickup() -> DeliveryMethod {
        DeliveryMethod::new(2, "Store pickup", MethodKind::Pickup)
    }

    fn slot(start: (u32, u32), end: (u32, u32)) -> TimeInterval {
        TimeInterval::Slot(TimeSlot::new(hm(start.0, start.1), hm(end.0, end.1)))
    }

    #[test]
    fn custom_labels_win_over_everything() {
        let mut method = courier();
        method.schedule.custom_labels =
            vec!["after lunch".to_string(), "call first".to_string()];
        method.schedule.early_slots = vec![TimeSlot::new(hm(9, 0), hm(12, 0))];

        let intervals = available_intervals(&method, DeliveryDateOption::Today, at(9, 0));
        assert_eq!(
            intervals,
            vec![
                TimeInterval::Custom("after lunch".to_string()),
                TimeInterval::Custom("call first".to_string())
            ]
        );
    }

    #[test]
    fn custom_labels_are_capped_at_two() {
        let mut method = courier();
        method.schedule.custom_labels = vec![
            "one".to_string(),
            "two".to_string(),
            "three".to_string(),
        ];
        assert_eq!(
            available_intervals(&method, DeliveryDateOption::Today, at(9, 0)).len(),
            2
        );
    }

    #[test]
    fn flexible_lists_follow_the_transition_for_today() {
        let mut method = courier();
        method.schedule.flexible_transition = NaiveTime::from_hms_opt(14, 0, 0);
        method.schedule.early_slots = vec![TimeSlot::new(hm(16, 0), hm(20, 0))];
        method.schedule.late_slots = vec![TimeSlot::new(hm(10, 0), hm(13, 0))];

        let early = available_intervals(&method, DeliveryDateOption::Today, at(9, 0));
        assert_eq!(early, vec![slot((16, 0), (20, 0))]);

        let late = available_intervals(&method, DeliveryDateOption::Today, at(15, 0));
        assert_eq!(late, vec![slot((10, 0), (13, 0))]);
    }

    #[test]
    fn other_dates_use_the_early_list() {
        let mut method = courier();
        method.schedule.flexible_transition = NaiveTime::from_hms_opt(14, 0, 0);
        method.schedule.early_slots = vec![TimeSlot::new(hm(16, 0), hm(20, 0))];
        method.schedule.late_slots = vec![TimeSlot::new(hm(10, 0), hm(13, 0))];

        // Even after the transition, a non-today date takes the early list.
        let intervals = available_intervals(&method, DeliveryDateOption::Plus2, at(15, 0));
        assert_eq!(intervals, vec![slot((16, 0), (20, 0))]);
    }

    #[test]
    fn non_today_dates_get_the_full_standard_set() {
        let intervals = available_intervals(&courier(), DeliveryDateOption::Tomorrow, at(23, 0));
        assert_eq!(
            intervals,
            vec![
                slot((10, 0), (12, 0)),
                slot((12, 0), (14, 0)),
                slot((14, 0), (16, 0)),
                slot((16, 0), (18, 0)),
                slot((18, 0), (19, 0)),
            ]
        );
    }

    #[test]
    fn pickup_today_keeps_partially_elapsed_blocks() {
        let intervals = available_intervals(&pickup(), DeliveryDateOption::Today, at(15, 30));
        assert_eq!(
            intervals,
            vec![
                slot((14, 0), (16, 0)),
                slot((16, 0), (18, 0)),
                slot((18, 0), (19, 0)),
            ]
        );
    }

    #[test]
    fn pickup_today_after_closing_is_empty() {
        assert!(available_intervals(&pickup(), DeliveryDateOption::Today, at(20, 0)).is_empty());
    }

    #[test]
    fn courier_today_takes_whole_windows_only() {
        let intervals = available_intervals(&courier(), DeliveryDateOption::Today, at(15, 30));
        assert_eq!(
            intervals,
            vec![slot((16, 0), (18, 0)), slot((18, 0), (19, 0))]
        );
    }

    #[test]
    fn courier_late_order_synthesizes_a_window_to_closing() {
        let intervals = available_intervals(&courier(), DeliveryDateOption::Today, at(18, 5));
        assert_eq!(intervals, vec![slot((18, 5), (19, 0))]);
    }

    #[test]
    fn synthesized_start_rounds_up_to_the_minute() {
        let now = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(18, 5, 30).unwrap());
        let intervals = available_intervals(&courier(), DeliveryDateOption::Today, now);
        assert_eq!(intervals, vec![slot((18, 6), (19, 0))]);
    }

    #[test]
    fn no_window_shorter_than_half_an_hour_is_synthesized() {
        assert!(available_intervals(&courier(), DeliveryDateOption::Today, at(18, 45)).is_empty());
    }

    #[test]
    fn slot_rendering() {
        assert_eq!(slot((10, 0), (12, 0)).to_string(), "10:00-12:00");
        assert_eq!(
            TimeInterval::Custom("call first".to_string()).to_string(),
            "call first"
        );
    }
}
