//! CSV readers for the passenger, timetable and assignment feeds.

use csv::StringRecord;
use std::io::Read;
use tracing::{debug, warn};

use crate::analyzers::types::AssignedTrip;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::matcher::PassengerEvent;
use crate::time::TimeOfDay;
use crate::timetable::TimetableEntry;

/// Passenger rows ready for matching.
#[derive(Debug, Clone)]
pub struct PassengerFeed {
    pub headers: StringRecord,
    pub events: Vec<PassengerEvent>,
    /// Rows dropped by the station filter.
    pub filtered_out: usize,
}

/// Timetable rows with a recognised schedule tag.
#[derive(Debug, Clone)]
pub struct TimetableFeed {
    pub entries: Vec<TimetableEntry>,
    pub unknown_tags: usize,
}

fn column_index(
    headers: &StringRecord,
    column: &str,
    source_name: &'static str,
) -> Result<usize, PipelineError> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| PipelineError::MissingColumn {
            column: column.to_string(),
            source_name,
        })
}

/// Reads the passenger feed, applying the configured station filter.
pub fn read_passengers<R: Read>(
    reader: R,
    config: &PipelineConfig,
) -> Result<PassengerFeed, PipelineError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let columns = &config.passengers;
    let date_idx = column_index(&headers, &columns.date, "passenger feed")?;
    let time_idx = column_index(&headers, &columns.time, "passenger feed")?;
    let station_filter = match &config.station {
        Some(station) => Some((
            column_index(&headers, &columns.station, "passenger feed")?,
            station.as_str(),
        )),
        None => None,
    };

    let mut events = Vec::new();
    let mut filtered_out = 0;

    for result in rdr.records() {
        let record = result?;

        if let Some((idx, station)) = station_filter {
            if record.get(idx) != Some(station) {
                filtered_out += 1;
                continue;
            }
        }

        let entry_date = record.get(date_idx).unwrap_or_default().to_string();
        let boarding_time = TimeOfDay::parse_opt(record.get(time_idx));
        events.push(PassengerEvent::new(entry_date, boarding_time).with_record(record));
    }

    debug!(
        events = events.len(),
        filtered_out, "Passenger feed read"
    );

    Ok(PassengerFeed {
        headers,
        events,
        filtered_out,
    })
}

/// Reads the timetable feed. Rows with an unknown schedule tag are skipped;
/// rows with an unparseable time are kept with an absent departure.
pub fn read_timetable<R: Read>(
    reader: R,
    config: &PipelineConfig,
) -> Result<TimetableFeed, PipelineError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let columns = &config.timetable;
    let tag_idx = column_index(&headers, &columns.schedule_type, "timetable")?;
    let departure_idx = column_index(&headers, &columns.departure, "timetable")?;

    let mut entries = Vec::new();
    let mut unknown_tags = 0;

    for result in rdr.records() {
        let record = result?;
        let tag = record.get(tag_idx).unwrap_or_default();

        let Some(schedule_type) = columns.schedule_type_of(tag) else {
            warn!(tag, "Unknown schedule type, skipping timetable row");
            unknown_tags += 1;
            continue;
        };

        entries.push(TimetableEntry {
            schedule_type,
            departure: TimeOfDay::parse_opt(record.get(departure_idx)),
        });
    }

    debug!(
        entries = entries.len(),
        unknown_tags, "Timetable feed read"
    );

    Ok(TimetableFeed {
        entries,
        unknown_tags,
    })
}

/// Reads a previously written assignment CSV back into trips.
pub fn read_assignments<R: Read>(
    reader: R,
    config: &PipelineConfig,
) -> Result<Vec<AssignedTrip>, PipelineError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let date_idx = column_index(&headers, &config.passengers.date, "assignment file")?;
    let departure_idx = column_index(&headers, &config.output_column, "assignment file")?;

    let mut trips = Vec::new();
    for result in rdr.records() {
        let record = result?;
        trips.push(AssignedTrip::new(
            record.get(date_idx).unwrap_or_default(),
            TimeOfDay::parse_opt(record.get(departure_idx)),
        ));
    }

    Ok(trips)
}
