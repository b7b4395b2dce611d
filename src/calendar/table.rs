use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

use super::{DATE_FORMAT, HolidayCalendar};
use crate::error::PipelineError;

/// Holiday calendar backed by an explicit set of dates.
///
/// Loaded from a plain text or CSV file, one date per line:
/// ```text
/// date,name
/// 2025-01-01,New Year's Day
/// # comments and blank lines are ignored
/// 2025-01-13
/// ```
/// Only the first column is read. A first line that is not a date is
/// treated as a header.
#[derive(Debug, Clone, Default)]
pub struct HolidayTable {
    dates: BTreeSet<NaiveDate>,
}

impl HolidayTable {
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Loads the table from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let table = Self::parse(&content)?;
        debug!(
            path = %path.as_ref().display(),
            holidays = table.len(),
            "Holiday table loaded"
        );
        Ok(table)
    }

    /// Parses the textual table format described on [`HolidayTable`].
    pub fn parse(content: &str) -> Result<Self, PipelineError> {
        let mut dates = BTreeSet::new();

        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let field = line.split(',').next().unwrap_or_default().trim();
            match NaiveDate::parse_from_str(field, DATE_FORMAT) {
                Ok(date) => {
                    dates.insert(date);
                }
                Err(_) if idx == 0 => continue,
                Err(_) => {
                    return Err(PipelineError::InvalidHolidayDate {
                        value: field.to_string(),
                        line: idx + 1,
                    });
                }
            }
        }

        Ok(Self { dates })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayCalendar for HolidayTable {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_header_comments_and_names() {
        let table = HolidayTable::parse(
            "date,name\n2025-01-01,New Year\n\n# extra\n2025-01-13\n",
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.is_holiday(d(2025, 1, 1)));
        assert!(table.is_holiday(d(2025, 1, 13)));
        assert!(!table.is_holiday(d(2025, 1, 2)));
    }

    #[test]
    fn rejects_bad_date_after_header() {
        let err = HolidayTable::parse("2025-01-01\nnot-a-date\n").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidHolidayDate { line: 2, .. }
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "2025-04-29").unwrap();
        let table = HolidayTable::load(file.path()).unwrap();
        assert!(table.is_holiday(d(2025, 4, 29)));
        assert!(!table.is_empty());
    }
}
