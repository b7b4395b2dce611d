//! Pipeline configuration.
//!
//! Stored as a JSON object on disk. Every field is optional and falls back
//! to the layout of the station gate exports:
//! ```json
//! {
//!   "passengers": { "date": "data_date", "time": "depature_station_time" },
//!   "timetable": { "weekday_tag": "weekday", "weekend_tag": "weekend" },
//!   "station": "Nakamozu",
//!   "holidays": { "kind": "table", "path": "holidays.csv" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::calendar::{Classifier, HolidayTable, ScheduleType};
use crate::error::PipelineError;

/// Column names of the passenger feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassengerColumns {
    pub date: String,
    pub time: String,
    /// Only read when a station filter is set.
    pub station: String,
}

impl Default for PassengerColumns {
    fn default() -> Self {
        Self {
            date: "data_date".to_string(),
            time: "depature_station_time".to_string(),
            station: "depature_station".to_string(),
        }
    }
}

/// Column names and schedule tag literals of the timetable feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableColumns {
    pub schedule_type: String,
    pub departure: String,
    pub weekday_tag: String,
    pub weekend_tag: String,
}

impl Default for TimetableColumns {
    fn default() -> Self {
        Self {
            schedule_type: "schedule_type".to_string(),
            departure: "departure_time".to_string(),
            weekday_tag: "weekday".to_string(),
            weekend_tag: "weekend".to_string(),
        }
    }
}

impl TimetableColumns {
    /// Maps a tag literal to its schedule type.
    pub fn schedule_type_of(&self, tag: &str) -> Option<ScheduleType> {
        if tag == self.weekday_tag {
            Some(ScheduleType::Weekday)
        } else if tag == self.weekend_tag {
            Some(ScheduleType::WeekendHoliday)
        } else {
            None
        }
    }
}

/// Where national holidays come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HolidaySource {
    /// Built-in Japanese calendar.
    #[default]
    Japan,
    /// Dates listed in a file, see [`HolidayTable`].
    Table { path: PathBuf },
}

impl HolidaySource {
    pub fn classifier(&self) -> Result<Classifier, PipelineError> {
        Ok(match self {
            HolidaySource::Japan => Classifier::japan(),
            HolidaySource::Table { path } => Classifier::new(Arc::new(HolidayTable::load(path)?)),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub passengers: PassengerColumns,
    pub timetable: TimetableColumns,
    /// Column appended to the passenger rows with the assigned departure.
    pub output_column: String,
    /// Keep only passengers entering at this station.
    pub station: Option<String>,
    pub holidays: HolidaySource,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            passengers: PassengerColumns::default(),
            timetable: TimetableColumns::default(),
            output_column: "train_time".to_string(),
            station: None,
            holidays: HolidaySource::default(),
        }
    }
}

impl PipelineConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, PipelineError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_station(mut self, station: Option<String>) -> Self {
        if station.is_some() {
            self.station = station;
        }
        self
    }
}
