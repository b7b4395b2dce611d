//! Sorted departure timetables and successor search.
//!
//! A [`Timetable`] holds the departures of one schedule type in ascending
//! order. [`TimetableIndex`] pairs the weekday and weekend/holiday tables.

use tracing::debug;

use crate::calendar::ScheduleType;
use crate::time::TimeOfDay;

/// One row of the timetable feed after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimetableEntry {
    pub schedule_type: ScheduleType,
    /// `None` when the source time could not be parsed.
    pub departure: Option<TimeOfDay>,
}

/// Departures of a single schedule type, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    departures: Vec<TimeOfDay>,
}

impl Timetable {
    /// Builds a timetable, dropping absent departures.
    ///
    /// Sorting is stable, so equal departures keep their input order.
    pub fn build(departures: impl IntoIterator<Item = Option<TimeOfDay>>) -> Self {
        let mut departures: Vec<TimeOfDay> = departures.into_iter().flatten().collect();
        departures.sort();
        Self { departures }
    }

    /// Smallest departure strictly after `t`.
    ///
    /// A passenger at the gate exactly at departure time has missed that
    /// train. Returns `None` once the last train of the day has left.
    ///
    /// ```
    /// use gate_ridership::time::TimeOfDay;
    /// use gate_ridership::timetable::Timetable;
    ///
    /// let t = |s: &str| TimeOfDay::parse(s);
    /// let table = Timetable::build([t("06:00"), t("06:30"), t("07:00")]);
    /// assert_eq!(table.first_departure_after(t("06:00").unwrap()), t("06:30"));
    /// assert_eq!(table.first_departure_after(t("07:00").unwrap()), None);
    /// ```
    pub fn first_departure_after(&self, t: TimeOfDay) -> Option<TimeOfDay> {
        let idx = self.departures.partition_point(|d| *d <= t);
        self.departures.get(idx).copied()
    }

    pub fn departures(&self) -> &[TimeOfDay] {
        &self.departures
    }

    pub fn len(&self) -> usize {
        self.departures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }
}

/// Weekday and weekend/holiday timetables, built once and read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimetableIndex {
    weekday: Timetable,
    weekend_holiday: Timetable,
}

impl TimetableIndex {
    pub fn new(weekday: Timetable, weekend_holiday: Timetable) -> Self {
        Self {
            weekday,
            weekend_holiday,
        }
    }

    /// Partitions entries by schedule type and builds both timetables.
    pub fn build(entries: impl IntoIterator<Item = TimetableEntry>) -> Self {
        let (weekday, weekend): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|e| e.schedule_type == ScheduleType::Weekday);

        let index = Self::new(
            Timetable::build(weekday.into_iter().map(|e| e.departure)),
            Timetable::build(weekend.into_iter().map(|e| e.departure)),
        );

        debug!(
            weekday = index.weekday.len(),
            weekend_holiday = index.weekend_holiday.len(),
            "Timetable index built"
        );
        index
    }

    pub fn get(&self, schedule_type: ScheduleType) -> &Timetable {
        match schedule_type {
            ScheduleType::Weekday => &self.weekday,
            ScheduleType::WeekendHoliday => &self.weekend_holiday,
        }
    }

    /// `true` when neither schedule type has a usable departure.
    pub fn is_empty(&self) -> bool {
        self.weekday.is_empty() && self.weekend_holiday.is_empty()
    }
}
