//! Ridership aggregation.
//!
//! This module splits assigned trips by schedule type, counts the calendar
//! days each period spans, and turns matched departures into per-departure
//! totals and per-day averages.

pub mod aggregate;
pub mod period;
pub mod types;
