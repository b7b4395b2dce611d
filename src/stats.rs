use serde::Serialize;
use tracing::info;

use crate::calendar::ScheduleType;
use crate::time::TimeOfDay;

/// Counters collected while assigning passengers to departures.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub total_events: usize,
    /// Rows dropped by the station filter before matching.
    pub filtered_out: usize,

    // inputs
    pub missing_time: usize,
    pub invalid_dates: usize,

    // schedule split, events with a usable time only
    pub weekday_events: usize,
    pub weekend_holiday_events: usize,

    // results
    pub matched: usize,
    pub unmatched: usize,
}

impl MatchStats {
    /// Records the outcome of one event.
    ///
    /// `schedule` is `None` when the boarding time was absent and no
    /// classification took place.
    pub fn record(&mut self, schedule: Option<ScheduleType>, departure: Option<TimeOfDay>) {
        self.total_events += 1;

        match schedule {
            Some(ScheduleType::Weekday) => self.weekday_events += 1,
            Some(ScheduleType::WeekendHoliday) => self.weekend_holiday_events += 1,
            None => self.missing_time += 1,
        }

        if departure.is_some() {
            self.matched += 1;
        } else {
            self.unmatched += 1;
        }
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    pub fn matched_pct(&self) -> f64 {
        Self::pct(self.matched, self.total_events)
    }

    /// Set the number of rows removed by the station filter
    pub fn with_filtered_out(mut self, filtered_out: usize) -> Self {
        self.filtered_out = filtered_out;
        self
    }

    /// Emits the run summary at `info` level.
    pub fn log_summary(&self) {
        info!(
            total = self.total_events,
            filtered_out = self.filtered_out,
            weekday = self.weekday_events,
            weekend_holiday = self.weekend_holiday_events,
            missing_time = self.missing_time,
            invalid_dates = self.invalid_dates,
            matched = self.matched,
            unmatched = self.unmatched,
            matched_pct = self.matched_pct(),
            "Assignment summary"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(MatchStats::pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_normal_values() {
        assert_eq!(MatchStats::pct(50, 100), 50.0);
        assert_eq!(MatchStats::pct(1, 4), 25.0);
    }

    #[test]
    fn test_record_outcomes() {
        let t = TimeOfDay::parse("08:10");
        let mut stats = MatchStats::default();
        stats.record(Some(ScheduleType::Weekday), t);
        stats.record(Some(ScheduleType::WeekendHoliday), None);
        stats.record(None, None);

        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.weekday_events, 1);
        assert_eq!(stats.weekend_holiday_events, 1);
        assert_eq!(stats.missing_time, 1);
        assert_eq!(stats.matched, 1);
        assert_eq!(stats.unmatched, 2);
    }

    #[test]
    fn test_matched_pct() {
        let stats = MatchStats {
            total_events: 4,
            matched: 3,
            unmatched: 1,
            ..Default::default()
        };
        assert_eq!(stats.matched_pct(), 75.0);
    }

    #[test]
    fn test_with_filtered_out() {
        let stats = MatchStats::default().with_filtered_out(7);
        assert_eq!(stats.filtered_out, 7);
    }
}
