//! National holidays of Japan, computed from the statutory rules.
//!
//! Covers 1973 through 2099. Earlier and later years have no holidays.

use chrono::{Datelike, NaiveDate, Weekday};

use super::HolidayCalendar;

const FIRST_YEAR: i32 = 1973;
const LAST_YEAR: i32 = 2099;

/// Rule-based Japanese national holiday calendar.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use gate_ridership::calendar::{HolidayCalendar, JapaneseHolidays};
///
/// let showa_day = NaiveDate::from_ymd_opt(2025, 4, 29).unwrap();
/// assert!(JapaneseHolidays.is_holiday(showa_day));
/// assert_eq!(JapaneseHolidays.holiday_name(showa_day), Some("Showa Day"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JapaneseHolidays;

impl JapaneseHolidays {
    /// Name of the holiday on `date`, if any.
    pub fn holiday_name(&self, date: NaiveDate) -> Option<&'static str> {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&date.year()) {
            return None;
        }
        if let Some(name) = named_holiday(date) {
            return Some(name);
        }
        if is_substitute_holiday(date) {
            return Some("Substitute Holiday");
        }
        if is_citizens_holiday(date) {
            return Some("Citizens' Holiday");
        }
        None
    }
}

impl HolidayCalendar for JapaneseHolidays {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Day of month of the `n`-th Monday.
fn nth_monday(year: i32, month: u32, n: u8) -> u32 {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Mon, n)
        .map_or(0, |date| date.day())
}

fn vernal_equinox_day(year: i32) -> u32 {
    equinox_day(year, 20.8357, 20.8431)
}

fn autumnal_equinox_day(year: i32) -> u32 {
    equinox_day(year, 23.2588, 23.2488)
}

/// Standard approximation of the equinox day, with separate constants
/// before and after 1980.
fn equinox_day(year: i32, base_before_1980: f64, base_from_1980: f64) -> u32 {
    let elapsed = f64::from(year - 1980) * 0.242194;
    let day = if year < 1980 {
        base_before_1980 + elapsed - f64::from((year - 1983) / 4)
    } else {
        base_from_1980 + elapsed - f64::from((year - 1980) / 4)
    };
    day.floor() as u32
}

/// Holidays defined by the National Holidays Act and the one-off
/// ceremonial days, excluding substitute and citizens' holidays.
fn named_holiday(date: NaiveDate) -> Option<&'static str> {
    let (y, m, d) = (date.year(), date.month(), date.day());

    let name = match m {
        1 if d == 1 => "New Year's Day",
        1 if y >= 2000 && d == nth_monday(y, 1, 2) => "Coming of Age Day",
        1 if y < 2000 && d == 15 => "Coming of Age Day",

        2 if d == 11 => "National Foundation Day",
        2 if y >= 2020 && d == 23 => "Emperor's Birthday",
        2 if y == 1989 && d == 24 => "State Funeral of Emperor Showa",

        3 if d == vernal_equinox_day(y) => "Vernal Equinox Day",

        4 if d == 29 && y < 1989 => "Emperor's Birthday",
        4 if d == 29 && y < 2007 => "Greenery Day",
        4 if d == 29 => "Showa Day",

        5 if d == 3 => "Constitution Memorial Day",
        5 if d == 4 && y >= 2007 => "Greenery Day",
        5 if d == 5 => "Children's Day",
        5 if y == 2019 && d == 1 => "Enthronement Day",

        6 if y == 1993 && d == 9 => "Wedding of the Crown Prince",

        7 if y == 2020 && d == 23 => "Marine Day",
        7 if y == 2020 && d == 24 => "Sports Day",
        7 if y == 2021 && d == 22 => "Marine Day",
        7 if y == 2021 && d == 23 => "Sports Day",
        7 if (1996..=2002).contains(&y) && d == 20 => "Marine Day",
        7 if y >= 2003 && y != 2020 && y != 2021 && d == nth_monday(y, 7, 3) => "Marine Day",

        8 if y == 2020 && d == 10 => "Mountain Day",
        8 if y == 2021 && d == 8 => "Mountain Day",
        8 if y >= 2016 && y != 2020 && y != 2021 && d == 11 => "Mountain Day",

        9 if y < 2003 && d == 15 => "Respect for the Aged Day",
        9 if y >= 2003 && d == nth_monday(y, 9, 3) => "Respect for the Aged Day",
        9 if d == autumnal_equinox_day(y) => "Autumnal Equinox Day",

        10 if y < 2000 && d == 10 => "Health and Sports Day",
        10 if (2000..2020).contains(&y) && d == nth_monday(y, 10, 2) => "Health and Sports Day",
        10 if y >= 2022 && d == nth_monday(y, 10, 2) => "Sports Day",
        10 if y == 2019 && d == 22 => "Enthronement Ceremony Day",

        11 if d == 3 => "Culture Day",
        11 if d == 23 => "Labour Thanksgiving Day",
        11 if y == 1990 && d == 12 => "Enthronement Ceremony Day",

        12 if (1989..=2018).contains(&y) && d == 23 => "Emperor's Birthday",

        _ => return None,
    };
    Some(name)
}

fn is_named(date: NaiveDate) -> bool {
    named_holiday(date).is_some()
}

/// 振替休日: a holiday falling on Sunday moves to the next day that is not
/// itself a holiday. Before 2007 only the following Monday qualified.
fn is_substitute_holiday(date: NaiveDate) -> bool {
    if date < ymd(1973, 4, 12) || is_named(date) {
        return false;
    }

    let Some(mut day) = date.pred_opt() else {
        return false;
    };

    if date.year() < 2007 {
        return day.weekday() == Weekday::Sun && is_named(day);
    }

    while is_named(day) {
        if day.weekday() == Weekday::Sun {
            return true;
        }
        let Some(prev) = day.pred_opt() else {
            return false;
        };
        day = prev;
    }
    false
}

/// 国民の休日: a non-Sunday day between two named holidays.
fn is_citizens_holiday(date: NaiveDate) -> bool {
    if date < ymd(1985, 12, 27) || date.weekday() == Weekday::Sun || is_named(date) {
        return false;
    }
    match (date.pred_opt(), date.succ_opt()) {
        (Some(prev), Some(next)) => is_named(prev) && is_named(next),
        _ => false,
    }
}
