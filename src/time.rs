//! Time-of-day normalization.
//!
//! Fare-gate and timetable feeds carry times as either `HH:MM` or
//! `HH:MM:SS`. Both are normalized into [`TimeOfDay`], which compares by
//! instant within a single day. There is no rollover past midnight.

use chrono::{NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

/// A time within a single day, 00:00:00 through 23:59:59.
///
/// # Examples
///
/// ```
/// use gate_ridership::time::TimeOfDay;
///
/// let a = TimeOfDay::parse("08:10").unwrap();
/// let b = TimeOfDay::parse("08:10:00").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "08:10:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Builds a time from components, or `None` when out of range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return None;
        }
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// Parses `HH:MM` or `HH:MM:SS`.
    ///
    /// Any other colon count, a non-numeric or empty field, or an out of
    /// range value yields `None`. Missing and malformed inputs are not
    /// distinguished.
    ///
    /// ```
    /// use gate_ridership::time::TimeOfDay;
    ///
    /// assert!(TimeOfDay::parse("").is_none());
    /// assert!(TimeOfDay::parse("25:00").is_none());
    /// assert!(TimeOfDay::parse("12:60").is_none());
    /// assert!(TimeOfDay::parse("12-30").is_none());
    /// assert!(TimeOfDay::parse("1:2:3:4").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let mut fields = [0u32; 3];
        let mut count = 0;

        for part in raw.split(':') {
            if count == fields.len() {
                return None;
            }
            fields[count] = parse_field(part)?;
            count += 1;
        }

        match count {
            2 => Self::from_hms(fields[0], fields[1], 0),
            3 => Self::from_hms(fields[0], fields[1], fields[2]),
            _ => None,
        }
    }

    /// Parses an optional CSV cell; an absent or empty cell is `None`.
    pub fn parse_opt(raw: Option<&str>) -> Option<Self> {
        raw.and_then(Self::parse)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

/// One or two ASCII digits.
fn parse_field(part: &str) -> Option<u32> {
    let bytes = part.as_bytes();
    if bytes.is_empty() || bytes.len() > 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(bytes.iter().fold(0, |acc, b| acc * 10 + u32::from(b - b'0')))
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
