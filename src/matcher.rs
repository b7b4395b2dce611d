//! Passenger-to-departure matching.
//!
//! Each gate entry is assigned the first departure strictly after its
//! boarding time, taken from the timetable of the schedule type of its
//! entry date. No fallback to the next day's first train exists; a
//! passenger after the last departure stays unmatched.

use csv::StringRecord;
use tracing::debug;

use crate::calendar::{Classifier, ScheduleType, parse_date};
use crate::stats::MatchStats;
use crate::time::TimeOfDay;
use crate::timetable::TimetableIndex;

/// One fare-gate passage.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerEvent {
    /// Entry date as it appears in the feed.
    pub entry_date: String,
    pub boarding_time: Option<TimeOfDay>,
    /// The full source row, written back out unchanged.
    pub record: StringRecord,
    /// Filled in once by [`Matcher::assign_all`].
    pub assigned_departure: Option<TimeOfDay>,
}

impl PassengerEvent {
    pub fn new(entry_date: impl Into<String>, boarding_time: Option<TimeOfDay>) -> Self {
        Self {
            entry_date: entry_date.into(),
            boarding_time,
            record: StringRecord::new(),
            assigned_departure: None,
        }
    }

    pub fn with_record(mut self, record: StringRecord) -> Self {
        self.record = record;
        self
    }
}

/// Matches events against a shared classifier and timetable index.
///
/// Holds only shared references; matching never mutates either input.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    classifier: &'a Classifier,
    index: &'a TimetableIndex,
}

impl<'a> Matcher<'a> {
    pub fn new(classifier: &'a Classifier, index: &'a TimetableIndex) -> Self {
        Self { classifier, index }
    }

    /// The departure this passenger most plausibly boarded.
    pub fn match_event(&self, event: &PassengerEvent) -> Option<TimeOfDay> {
        self.classify_and_match(event)
            .and_then(|(_, departure)| departure)
    }

    /// Schedule type used and departure found. `None` when the boarding
    /// time is absent, in which case the date is not classified.
    fn classify_and_match(
        &self,
        event: &PassengerEvent,
    ) -> Option<(ScheduleType, Option<TimeOfDay>)> {
        let boarding = event.boarding_time?;
        let schedule = self.classifier.classify_str(&event.entry_date);
        let departure = self.index.get(schedule).first_departure_after(boarding);
        Some((schedule, departure))
    }

    /// Assigns a departure to every event and returns the counters.
    pub fn assign_all(&self, events: &mut [PassengerEvent]) -> MatchStats {
        let mut stats = MatchStats::default();

        for event in events.iter_mut() {
            if parse_date(&event.entry_date).is_none() {
                stats.invalid_dates += 1;
            }

            let outcome = self.classify_and_match(event);
            let departure = outcome.and_then(|(_, departure)| departure);
            event.assigned_departure = departure;
            stats.record(outcome.map(|(schedule, _)| schedule), departure);
        }

        debug!(
            events = stats.total_events,
            matched = stats.matched,
            "Departures assigned"
        );
        stats
    }
}
