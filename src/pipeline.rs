//! End-to-end batch runs.
//!
//! [`Pipeline::assign`] reads both feeds, builds the timetable index once
//! and matches every passenger. [`Pipeline::summarize`] runs after all
//! matches are complete and aggregates them per schedule type.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

use crate::analyzers::aggregate;
use crate::analyzers::types::{AssignedTrip, RidershipReport};
use crate::calendar::Classifier;
use crate::config::PipelineConfig;
use crate::error::{NoWorkReason, PipelineError};
use crate::matcher::{Matcher, PassengerEvent};
use crate::parser::{read_assignments, read_passengers, read_timetable};
use crate::stats::MatchStats;
use crate::timetable::TimetableIndex;
use csv::StringRecord;

/// Passenger rows with their assigned departures.
#[derive(Debug, Clone)]
pub struct Assignment {
    pub headers: StringRecord,
    pub events: Vec<PassengerEvent>,
    pub stats: MatchStats,
}

impl Assignment {
    pub fn trips(&self) -> Vec<AssignedTrip> {
        self.events.iter().map(AssignedTrip::from).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    classifier: Classifier,
}

impl Pipeline {
    /// Builds a pipeline, loading the configured holiday calendar.
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let classifier = config.holidays.classifier()?;
        Ok(Self::with_classifier(config, classifier))
    }

    pub fn with_classifier(config: PipelineConfig, classifier: Classifier) -> Self {
        Self { config, classifier }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Matches every passenger in `passengers` against `timetable`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::NoWork`] when there are no passengers to match or
    /// no usable departure in either timetable.
    #[tracing::instrument(skip_all, fields(station = ?self.config.station))]
    pub fn assign<P: Read, T: Read>(
        &self,
        passengers: P,
        timetable: T,
    ) -> Result<Assignment, PipelineError> {
        let timetable = read_timetable(timetable, &self.config)?;
        let index = TimetableIndex::build(timetable.entries);
        if index.is_empty() {
            return Err(PipelineError::NoWork(NoWorkReason::NoUsableTimetable));
        }

        let feed = read_passengers(passengers, &self.config)?;
        if feed.events.is_empty() {
            return Err(PipelineError::NoWork(NoWorkReason::EmptyPassengerFeed));
        }

        let mut events = feed.events;
        let stats = Matcher::new(&self.classifier, &index)
            .assign_all(&mut events)
            .with_filtered_out(feed.filtered_out);

        if timetable.unknown_tags > 0 {
            warn!(
                rows = timetable.unknown_tags,
                "Timetable rows with unknown schedule type were ignored"
            );
        }
        stats.log_summary();

        Ok(Assignment {
            headers: feed.headers,
            events,
            stats,
        })
    }

    /// [`Pipeline::assign`] over files.
    pub fn assign_files(
        &self,
        passengers: &Path,
        timetable: &Path,
    ) -> Result<Assignment, PipelineError> {
        info!(
            passengers = %passengers.display(),
            timetable = %timetable.display(),
            "Reading feeds"
        );
        self.assign(File::open(passengers)?, File::open(timetable)?)
    }

    /// Aggregates assigned trips per schedule type.
    pub fn summarize(&self, trips: &[AssignedTrip]) -> RidershipReport {
        aggregate::summarize(&self.classifier, trips)
    }

    /// Reads a previously written assignment CSV and aggregates it.
    ///
    /// # Errors
    ///
    /// [`PipelineError::NoWork`] when the file has no rows.
    #[tracing::instrument(skip_all, fields(path = %path.display()))]
    pub fn summarize_file(&self, path: &Path) -> Result<RidershipReport, PipelineError> {
        let trips = read_assignments(File::open(path)?, &self.config)?;
        if trips.is_empty() {
            return Err(PipelineError::NoWork(NoWorkReason::EmptyPassengerFeed));
        }
        Ok(self.summarize(&trips))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::ScheduleType;
    use crate::time::TimeOfDay;

    const TIMETABLE: &str = "\
schedule_type,departure_time
weekday,07:55
weekday,08:10
weekday,08:25
weekend,08:30
";

    fn pipeline() -> Pipeline {
        Pipeline::new(PipelineConfig::default()).unwrap()
    }

    #[test]
    fn wednesday_commuters_take_the_next_train() {
        let passengers = "\
data_date,depature_station_time
2025-04-09,08:03
2025-04-09,08:03:30
2025-04-09,07:56
";
        let assignment = pipeline()
            .assign(passengers.as_bytes(), TIMETABLE.as_bytes())
            .unwrap();

        let t = TimeOfDay::parse("08:10");
        assert!(
            assignment
                .events
                .iter()
                .all(|e| e.assigned_departure == t)
        );

        let report = pipeline().summarize(&assignment.trips());
        let weekday = report.get(ScheduleType::Weekday).unwrap();
        assert_eq!(weekday.period_days, 1);
        assert_eq!(weekday.rows.len(), 1);
        assert_eq!(weekday.rows[0].total_count, 3);
        assert_eq!(weekday.rows[0].average_per_day, Some(3.0));
    }

    #[test]
    fn empty_passenger_feed_is_no_work() {
        let err = pipeline()
            .assign("data_date,depature_station_time\n".as_bytes(), TIMETABLE.as_bytes())
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::NoWork(NoWorkReason::EmptyPassengerFeed)
        ));
    }

    #[test]
    fn unusable_timetable_is_no_work() {
        let timetable = "schedule_type,departure_time\nweekday,late\nspecial,08:00\n";
        let err = pipeline()
            .assign(
                "data_date,depature_station_time\n2025-04-09,08:00\n".as_bytes(),
                timetable.as_bytes(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::NoWork(NoWorkReason::NoUsableTimetable)
        ));
    }

    #[test]
    fn one_empty_schedule_type_is_fine() {
        let timetable = "schedule_type,departure_time\nweekday,08:10\n";
        let assignment = pipeline()
            .assign(
                "data_date,depature_station_time\n2025-04-12,08:00\n".as_bytes(),
                timetable.as_bytes(),
            )
            .unwrap();
        assert_eq!(assignment.stats.unmatched, 1);
        assert_eq!(assignment.events[0].assigned_departure, None);
    }
}
