use chrono::NaiveDate;

use crate::calendar::{Classifier, parse_date};

/// Counts the days of one schedule type in the span of `dates`.
///
/// Every calendar day in `[min, max]` is classified, whether or not it
/// appears in `dates`; the observation window is assumed gapless. Returns 0
/// for an empty input.
pub fn count_days(
    classifier: &Classifier,
    dates: impl IntoIterator<Item = NaiveDate>,
    want_weekday: bool,
) -> u32 {
    let Some((min, max)) = dates.into_iter().fold(None, |span, date| match span {
        None => Some((date, date)),
        Some((lo, hi)) => Some((date.min(lo), date.max(hi))),
    }) else {
        return 0;
    };

    let days = min
        .iter_days()
        .take_while(|day| *day <= max)
        .filter(|day| classifier.is_weekday(*day) == want_weekday)
        .count();
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// Same as [`count_days`] over raw feed dates; unparseable ones are skipped.
pub fn count_days_str<'a>(
    classifier: &Classifier,
    dates: impl IntoIterator<Item = &'a str>,
    want_weekday: bool,
) -> u32 {
    count_days(
        classifier,
        dates.into_iter().filter_map(parse_date),
        want_weekday,
    )
}
