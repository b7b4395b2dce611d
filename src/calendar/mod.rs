//! Calendar classification.
//!
//! [`HolidayCalendar`] is the lookup seam for a national holiday calendar.
//! [`JapaneseHolidays`] implements it from the statutory rules.
//! [`HolidayTable`] implements it from an explicit list of dates.
//! [`Classifier`] combines a calendar with day-of-week to decide which
//! timetable ([`ScheduleType`]) governs a date. The matcher and the period
//! day counter share the same classifier.

mod japan;
mod table;

pub use japan::JapaneseHolidays;
pub use table::HolidayTable;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Textual format of entry dates in the feeds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Lookup of national holidays by date.
pub trait HolidayCalendar: Send + Sync {
    /// Returns `true` if `date` is a national holiday. Dates outside the
    /// calendar's coverage are not holidays.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Which timetable applies on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    Weekday,
    WeekendHoliday,
}

impl ScheduleType {
    pub const ALL: [ScheduleType; 2] = [ScheduleType::Weekday, ScheduleType::WeekendHoliday];

    pub fn from_is_weekday(is_weekday: bool) -> Self {
        if is_weekday {
            ScheduleType::Weekday
        } else {
            ScheduleType::WeekendHoliday
        }
    }

    pub fn is_weekday(self) -> bool {
        self == ScheduleType::Weekday
    }

    /// Stable identifier used in output file names.
    pub fn as_str(self) -> &'static str {
        match self {
            ScheduleType::Weekday => "weekday",
            ScheduleType::WeekendHoliday => "weekend_holiday",
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a feed date in [`DATE_FORMAT`].
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Weekday vs. weekend/holiday classifier over a shared holiday calendar.
///
/// Cheap to clone; the calendar is behind an `Arc` and read-only.
#[derive(Clone)]
pub struct Classifier {
    holidays: Arc<dyn HolidayCalendar>,
}

impl Classifier {
    pub fn new(holidays: Arc<dyn HolidayCalendar>) -> Self {
        Self { holidays }
    }

    /// Classifier backed by the built-in Japanese calendar.
    pub fn japan() -> Self {
        Self::new(Arc::new(JapaneseHolidays))
    }

    /// Monday to Friday and not a national holiday.
    pub fn is_weekday(&self, date: NaiveDate) -> bool {
        !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !self.holidays.is_holiday(date)
    }

    pub fn classify(&self, date: NaiveDate) -> ScheduleType {
        ScheduleType::from_is_weekday(self.is_weekday(date))
    }

    /// Classifies a raw feed date.
    ///
    /// Unparseable dates fail closed: they are logged and treated as
    /// weekend/holiday.
    pub fn classify_str(&self, raw: &str) -> ScheduleType {
        match parse_date(raw) {
            Some(date) => self.classify(date),
            None => {
                warn!(date = raw, "Invalid date format, assuming not weekday");
                ScheduleType::WeekendHoliday
            }
        }
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn weekend_is_not_weekday() {
        let c = Classifier::japan();
        // 2025-04-05 is a Saturday, 2025-04-06 a Sunday.
        assert!(!c.is_weekday(d(2025, 4, 5)));
        assert!(!c.is_weekday(d(2025, 4, 6)));
        assert!(c.is_weekday(d(2025, 4, 7)));
    }

    #[test]
    fn holiday_on_weekday_is_not_weekday() {
        let c = Classifier::japan();
        // Showa Day, a Tuesday.
        assert!(!c.is_weekday(d(2025, 4, 29)));
        assert_eq!(c.classify(d(2025, 4, 29)), ScheduleType::WeekendHoliday);
        assert_eq!(c.classify(d(2025, 4, 30)), ScheduleType::Weekday);
    }

    #[test]
    fn unparseable_date_fails_closed() {
        let c = Classifier::japan();
        assert_eq!(c.classify_str("2025/04/07"), ScheduleType::WeekendHoliday);
        assert_eq!(c.classify_str(""), ScheduleType::WeekendHoliday);
        assert_eq!(c.classify_str("2025-02-30"), ScheduleType::WeekendHoliday);
        assert_eq!(c.classify_str("2025-04-07"), ScheduleType::Weekday);
    }

    #[test]
    fn custom_calendar_is_consulted() {
        let table = HolidayTable::from_dates([d(2025, 4, 7)]);
        let c = Classifier::new(Arc::new(table));
        assert!(!c.is_weekday(d(2025, 4, 7)));
        // Showa Day is not in the custom table.
        assert!(c.is_weekday(d(2025, 4, 29)));
    }

    #[test]
    fn weekday_property_over_multi_year_sample() {
        let c = Classifier::japan();
        let cal = JapaneseHolidays;
        let mut date = d(2019, 1, 1);
        let end = d(2026, 12, 31);
        let mut seen_weekday_holiday = HashSet::new();

        while date <= end {
            let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
            let holiday = cal.is_holiday(date);
            assert_eq!(c.is_weekday(date), !weekend && !holiday, "{date}");
            if holiday && !weekend {
                seen_weekday_holiday.insert(date);
            }
            date = date.succ_opt().unwrap();
        }

        assert!(seen_weekday_holiday.contains(&d(2025, 4, 29)));
    }

    #[test]
    fn schedule_type_names() {
        assert_eq!(ScheduleType::Weekday.to_string(), "weekday");
        assert_eq!(ScheduleType::WeekendHoliday.as_str(), "weekend_holiday");
        assert!(ScheduleType::from_is_weekday(true).is_weekday());
        assert!(!ScheduleType::from_is_weekday(false).is_weekday());
    }
}
