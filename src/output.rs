//! Output formatting and persistence for assignments and ridership reports.
//!
//! Supports log summaries, JSON serialization, and CSV files.

use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::analyzers::types::PeriodReport;
use crate::calendar::ScheduleType;
use crate::error::PipelineError;
use crate::matcher::PassengerEvent;
use csv::{StringRecord, Writer, WriterBuilder};

/// Rows shown per period when logging a report.
const PREVIEW_ROWS: usize = 10;

const COUNT_HEADERS: [&str; 3] = [
    "train_time",
    "passenger_count_total",
    "passenger_count_avg_per_day",
];

/// One row of the per-period counts CSV, in [`COUNT_HEADERS`] order.
#[derive(Debug, Serialize)]
struct CountRow {
    train_time: String,
    passenger_count_total: usize,
    passenger_count_avg_per_day: Option<f64>,
}

/// CSV and JSON paths of a period report under `output_dir`.
pub fn report_paths(output_dir: &Path, schedule_type: ScheduleType) -> (PathBuf, PathBuf) {
    let dir = output_dir.join("counts");
    let stem = format!("train_passenger_counts_{}", schedule_type.as_str());
    (
        dir.join(format!("{stem}.csv")),
        dir.join(format!("{stem}.json")),
    )
}

/// Writes the passenger rows with the assigned departure appended as
/// `output_column`. Unmatched rows get an empty cell.
pub fn write_assignments<W: Write>(
    writer: W,
    headers: &StringRecord,
    events: &[PassengerEvent],
    output_column: &str,
) -> Result<(), PipelineError> {
    let mut wtr = Writer::from_writer(writer);

    let mut header = headers.clone();
    header.push_field(output_column);
    wtr.write_record(&header)?;

    for event in events {
        let mut row = event.record.clone();
        match event.assigned_departure {
            Some(departure) => row.push_field(&departure.to_string()),
            None => row.push_field(""),
        }
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes the per-departure counts of one period as CSV.
///
/// The header is written even when the period has no rows.
pub fn write_report_csv<W: Write>(writer: W, report: &PeriodReport) -> Result<(), PipelineError> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(COUNT_HEADERS)?;

    for row in &report.rows {
        wtr.serialize(CountRow {
            train_time: row.departure.to_string(),
            passenger_count_total: row.total_count,
            passenger_count_avg_per_day: row.average_per_day,
        })?;
    }

    wtr.flush()?;
    Ok(())
}

/// Serializes any value as pretty JSON into `path`, creating parent
/// directories.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<(), PipelineError> {
    create_parent(path)?;
    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.write_all(b"\n")?;
    debug!(path = %path.display(), "JSON written");
    Ok(())
}

/// Writes both files of a period report under `output_dir`.
pub fn write_report(output_dir: &Path, report: &PeriodReport) -> Result<(), PipelineError> {
    let (csv_path, json_path) = report_paths(output_dir, report.schedule_type);

    create_parent(&csv_path)?;
    write_report_csv(File::create(&csv_path)?, report)?;
    write_json(&json_path, report)?;

    info!(
        period = %report.schedule_type,
        path = %csv_path.display(),
        "Ridership counts saved"
    );
    Ok(())
}

fn create_parent(path: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Logs the head of a period report.
pub fn log_report(report: &PeriodReport) {
    if report.matched == 0 {
        info!(period = %report.schedule_type, "No matched trains in period");
        return;
    }

    info!(
        period = %report.schedule_type,
        events = report.events,
        matched = report.matched,
        period_days = report.period_days,
        departures = report.rows.len(),
        "Ridership per departure"
    );

    for row in report.rows.iter().take(PREVIEW_ROWS) {
        info!(
            train_time = %row.departure,
            total = row.total_count,
            avg_per_day = row.average_per_day.map(|avg| (avg * 100.0).round() / 100.0),
            "Departure"
        );
    }
}
