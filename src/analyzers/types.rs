//! Data types used by the aggregation pipeline.

use serde::Serialize;

use crate::calendar::ScheduleType;
use crate::matcher::PassengerEvent;
use crate::time::TimeOfDay;

/// A passenger's entry date and the departure assigned to them.
///
/// Built from in-memory [`PassengerEvent`]s or read back from a previously
/// written assignment CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedTrip {
    pub entry_date: String,
    pub departure: Option<TimeOfDay>,
}

impl AssignedTrip {
    pub fn new(entry_date: impl Into<String>, departure: Option<TimeOfDay>) -> Self {
        Self {
            entry_date: entry_date.into(),
            departure,
        }
    }
}

impl From<&PassengerEvent> for AssignedTrip {
    fn from(event: &PassengerEvent) -> Self {
        Self::new(event.entry_date.clone(), event.assigned_departure)
    }
}

/// Ridership of a single scheduled departure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub departure: TimeOfDay,
    pub total_count: usize,
    /// `None` when the period has no days to average over.
    pub average_per_day: Option<f64>,
}

/// Ridership per departure for one schedule type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodReport {
    pub schedule_type: ScheduleType,
    /// Calendar days of this schedule type spanned by the matched events.
    pub period_days: u32,
    /// Events whose entry date falls in this schedule type.
    pub events: usize,
    pub matched: usize,
    pub rows: Vec<AggregateRow>,
}

impl PeriodReport {
    /// `false` when averages are undefined.
    pub fn has_average(&self) -> bool {
        self.period_days > 0
    }
}

/// Reports for both schedule types, weekday first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RidershipReport {
    pub schema_version: u8,
    pub periods: Vec<PeriodReport>,
}

impl RidershipReport {
    pub fn get(&self, schedule_type: ScheduleType) -> Option<&PeriodReport> {
        self.periods
            .iter()
            .find(|p| p.schedule_type == schedule_type)
    }
}
