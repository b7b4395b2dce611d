use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::analyzers::period::count_days;
use crate::analyzers::types::{AggregateRow, AssignedTrip, PeriodReport, RidershipReport};
use crate::calendar::{Classifier, ScheduleType, parse_date};
use crate::time::TimeOfDay;

/// Current layout of [`RidershipReport`] JSON.
const SCHEMA_VERSION: u8 = 1;

/// Average per day, undefined for an empty period.
fn per_day(total: usize, period_days: u32) -> Option<f64> {
    if period_days == 0 {
        None
    } else {
        Some(total as f64 / f64::from(period_days))
    }
}

/// Groups matched departures by exact time and computes totals and
/// per-day averages, ordered by time of day.
pub fn aggregate(
    departures: impl IntoIterator<Item = TimeOfDay>,
    period_days: u32,
) -> Vec<AggregateRow> {
    let mut counts: BTreeMap<TimeOfDay, usize> = BTreeMap::new();
    for departure in departures {
        *counts.entry(departure).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(departure, total_count)| AggregateRow {
            departure,
            total_count,
            average_per_day: per_day(total_count, period_days),
        })
        .collect()
}

/// Builds the report for the trips already known to belong to
/// `schedule_type`.
///
/// Unmatched trips are dropped first; the day span is taken over the dates
/// of the remaining matched trips only.
pub fn summarize_period(
    classifier: &Classifier,
    schedule_type: ScheduleType,
    trips: &[&AssignedTrip],
) -> PeriodReport {
    let matched: Vec<(&str, TimeOfDay)> = trips
        .iter()
        .filter_map(|trip| Some((trip.entry_date.as_str(), trip.departure?)))
        .collect();

    let period_days = count_days(
        classifier,
        matched.iter().filter_map(|(date, _)| parse_date(date)),
        schedule_type.is_weekday(),
    );

    if !matched.is_empty() && period_days == 0 {
        warn!(
            period = %schedule_type,
            "No days in period, average per day is undefined"
        );
    }

    let rows = aggregate(matched.iter().map(|(_, departure)| *departure), period_days);

    debug!(
        period = %schedule_type,
        events = trips.len(),
        matched = matched.len(),
        period_days,
        departures = rows.len(),
        "Period aggregated"
    );

    PeriodReport {
        schedule_type,
        period_days,
        events: trips.len(),
        matched: matched.len(),
        rows,
    }
}

/// Splits trips by the schedule type of their entry date and aggregates
/// each period independently.
pub fn summarize(classifier: &Classifier, trips: &[AssignedTrip]) -> RidershipReport {
    let mut by_schedule: BTreeMap<ScheduleType, Vec<&AssignedTrip>> = ScheduleType::ALL
        .into_iter()
        .map(|s| (s, Vec::new()))
        .collect();

    for trip in trips {
        let schedule = classifier.classify_str(&trip.entry_date);
        by_schedule.entry(schedule).or_default().push(trip);
    }

    let periods = by_schedule
        .into_iter()
        .map(|(schedule, group)| summarize_period(classifier, schedule, &group))
        .collect();

    RidershipReport {
        schema_version: SCHEMA_VERSION,
        periods,
    }
}
