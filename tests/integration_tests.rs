use gate_ridership::calendar::ScheduleType;
use gate_ridership::config::PipelineConfig;
use gate_ridership::error::{NoWorkReason, PipelineError};
use gate_ridership::output::{report_paths, write_assignments, write_report};
use gate_ridership::pipeline::Pipeline;
use gate_ridership::time::TimeOfDay;
use std::fs::{self, File};

const PASSENGERS: &str = include_str!("fixtures/passengers.csv");
const TIMETABLE: &str = include_str!("fixtures/timetable.csv");

fn t(s: &str) -> TimeOfDay {
    TimeOfDay::parse(s).unwrap()
}

fn nakamozu() -> Pipeline {
    let config = PipelineConfig::default().with_station(Some("Nakamozu".into()));
    Pipeline::new(config).expect("Failed to build pipeline")
}

#[test]
fn test_full_pipeline() {
    let pipeline = nakamozu();
    let assignment = pipeline
        .assign(PASSENGERS.as_bytes(), TIMETABLE.as_bytes())
        .expect("Failed to assign");

    let assigned: Vec<_> = assignment
        .events
        .iter()
        .map(|e| e.assigned_departure)
        .collect();
    assert_eq!(
        assigned,
        vec![
            Some(t("08:10")),
            Some(t("08:10")),
            Some(t("08:25")),
            Some(t("09:00")),
            Some(t("08:00")),
            None,
            None,
            None,
        ]
    );

    let stats = &assignment.stats;
    assert_eq!(stats.total_events, 8);
    assert_eq!(stats.filtered_out, 1);
    assert_eq!(stats.missing_time, 2);
    assert_eq!(stats.weekday_events, 3);
    assert_eq!(stats.weekend_holiday_events, 3);
    assert_eq!(stats.matched, 5);
    assert_eq!(stats.unmatched, 3);

    let report = pipeline.summarize(&assignment.trips());

    let weekday = report.get(ScheduleType::Weekday).unwrap();
    assert_eq!(weekday.period_days, 5);
    assert_eq!(weekday.matched, 3);
    let rows: Vec<_> = weekday
        .rows
        .iter()
        .map(|r| (r.departure, r.total_count, r.average_per_day))
        .collect();
    assert_eq!(
        rows,
        vec![(t("08:10"), 2, Some(0.4)), (t("08:25"), 1, Some(0.2))]
    );

    let weekend = report.get(ScheduleType::WeekendHoliday).unwrap();
    assert_eq!(weekend.period_days, 2);
    let rows: Vec<_> = weekend
        .rows
        .iter()
        .map(|r| (r.departure, r.total_count, r.average_per_day))
        .collect();
    assert_eq!(
        rows,
        vec![(t("08:00"), 1, Some(0.5)), (t("09:00"), 1, Some(0.5))]
    );
}

#[test]
fn test_aggregate_from_written_assignments() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = nakamozu();
    let assignment = pipeline
        .assign(PASSENGERS.as_bytes(), TIMETABLE.as_bytes())
        .unwrap();

    let path = dir.path().join("assigned.csv");
    write_assignments(
        File::create(&path).unwrap(),
        &assignment.headers,
        &assignment.events,
        &pipeline.config().output_column,
    )
    .unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("data_number,data_date,depature_station,depature_station_time,arrival_station,train_time")
    );
    assert_eq!(lines.next(), Some("0,2025-04-07,Nakamozu,08:03,Namba,08:10:00"));

    let from_file = pipeline.summarize_file(&path).unwrap();
    let in_memory = pipeline.summarize(&assignment.trips());
    assert_eq!(from_file, in_memory);
}

#[test]
fn test_runs_are_byte_identical() {
    let run = || {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = nakamozu();
        let assignment = pipeline
            .assign(PASSENGERS.as_bytes(), TIMETABLE.as_bytes())
            .unwrap();

        let mut assigned = Vec::new();
        write_assignments(
            &mut assigned,
            &assignment.headers,
            &assignment.events,
            "train_time",
        )
        .unwrap();

        let report = pipeline.summarize(&assignment.trips());
        let mut counts = Vec::new();
        for period in &report.periods {
            write_report(dir.path(), period).unwrap();
            let (csv, json) = report_paths(dir.path(), period.schedule_type);
            counts.push(fs::read(csv).unwrap());
            counts.push(fs::read(json).unwrap());
        }
        (assigned, counts)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_empty_feed_reports_no_work() {
    let pipeline = nakamozu();
    let header_only = PASSENGERS.lines().next().unwrap();
    let err = pipeline
        .assign(header_only.as_bytes(), TIMETABLE.as_bytes())
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::NoWork(NoWorkReason::EmptyPassengerFeed)
    ));
}

#[test]
fn test_custom_holiday_table_changes_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let holidays = dir.path().join("holidays.csv");
    // Make Friday 2025-04-11 a holiday.
    fs::write(&holidays, "date\n2025-04-11\n").unwrap();

    let config: PipelineConfig = serde_json::from_str(&format!(
        r#"{{"station": "Nakamozu", "holidays": {{"kind": "table", "path": {:?}}}}}"#,
        holidays.to_str().unwrap()
    ))
    .unwrap();
    let pipeline = Pipeline::new(config).unwrap();
    let assignment = pipeline
        .assign(PASSENGERS.as_bytes(), TIMETABLE.as_bytes())
        .unwrap();

    // 08:10 on a holiday takes the 09:00 weekend train.
    assert_eq!(assignment.events[2].assigned_departure, Some(t("09:00")));
}
