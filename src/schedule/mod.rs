//! Delivery-date and time-interval availability.
//!
//! Dates are relative offsets from "now" until rendered; intervals come from
//! a prioritized source chain (operator labels, flexible early/late lists,
//! generated standard blocks).

mod dates;
mod intervals;

pub use dates::{available_dates, DeliveryDateOption};
pub use intervals::{available_intervals, TimeInterval};
