//! Error types for the ridership pipeline.
//!
//! Per-record problems (bad dates, bad times, unknown schedule tags) are
//! never errors; they are logged and folded into "unmatched". Only problems
//! that make the whole run meaningless surface here.

use std::fmt;

/// Why a run produced no output at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoWorkReason {
    /// The passenger feed had no rows (after station filtering).
    EmptyPassengerFeed,
    /// Neither schedule type has a single usable departure.
    NoUsableTimetable,
}

impl fmt::Display for NoWorkReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoWorkReason::EmptyPassengerFeed => f.write_str("passenger feed is empty"),
            NoWorkReason::NoUsableTimetable => {
                f.write_str("timetable has no usable departures for any schedule type")
            }
        }
    }
}

/// Run-level failures.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from a CSV header.
    #[error("missing column '{column}' in {source_name}")]
    MissingColumn {
        column: String,
        source_name: &'static str,
    },

    /// A holiday table line could not be parsed as a date.
    #[error("invalid holiday date '{value}' on line {line}")]
    InvalidHolidayDate { value: String, line: usize },

    #[error("no work done: {0}")]
    NoWork(NoWorkReason),
}

impl PipelineError {
    /// Returns `true` for the "nothing usable in the input" outcome.
    pub fn is_no_work(&self) -> bool {
        matches!(self, PipelineError::NoWork(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PipelineError::MissingColumn {
            column: "data_date".into(),
            source_name: "passenger feed",
        };
        assert_eq!(
            err.to_string(),
            "missing column 'data_date' in passenger feed"
        );
    }

    #[test]
    fn no_work_is_distinguishable() {
        let err = PipelineError::NoWork(NoWorkReason::EmptyPassengerFeed);
        assert!(err.is_no_work());
        assert_eq!(err.to_string(), "no work done: passenger feed is empty");

        let io = PipelineError::Io(std::io::Error::other("boom"));
        assert!(!io.is_no_work());
    }
}
