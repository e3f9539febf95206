//! Calendar-day date utilities.
//!
//! All grid arithmetic works on [`NaiveDate`], so shifting by `n` days is a
//! calendar shift and never drifts across DST transitions. Wall-clock time
//! only enters at the edges: truncating an epoch-milliseconds stamp to its
//! local day, and the `now`-based range defaults.

use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::data_types::DateStamp;
use crate::HeatmapError;

/// Resolves any of the accepted date representations to its calendar day.
///
/// ISO strings may be plain dates (`2022-11-01`) or full RFC 3339 stamps;
/// the latter keep their own offset's calendar day (no timezone conversion).
/// Epoch milliseconds truncate to the local day.
pub fn normalize(stamp: &DateStamp) -> Result<NaiveDate, HeatmapError> {
    match stamp {
        DateStamp::Date(date) => Ok(*date),
        DateStamp::Iso(text) => {
            if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                return Ok(date);
            }
            DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.naive_local().date())
                .map_err(|_| HeatmapError::InvalidDateKind(text.clone()))
        }
        DateStamp::EpochMillis(ms) => match Local.timestamp_millis_opt(*ms) {
            LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.date_naive()),
            LocalResult::None => Err(HeatmapError::InvalidDateKind(ms.to_string())),
        },
    }
}

/// Midnight at the start of the given day.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The last representable millisecond of the given day.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

/// Shifts a date by `n` calendar days (negative shifts backwards).
pub fn shift(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

/// Number of calendar days from `a` to `b`; zero when they are the same day,
/// negative when `b` precedes `a`.
pub fn day_difference(a: &DateStamp, b: &DateStamp) -> Result<i64, HeatmapError> {
    let a = normalize(a)?;
    let b = normalize(b)?;
    Ok((b - a).num_days())
}

/// Today's local date shifted `n` days into the past.
pub fn date_n_days_ago(n: i64) -> NaiveDate {
    shift(Local::now().date_naive(), -n)
}

/// ISO calendar rendition (`YYYY-MM-DD`), used for default cell titles.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Weekday position with 0 = Sunday, matching the grid's first weekday.
pub fn weekday_index(date: NaiveDate) -> i64 {
    i64::from(date.weekday().num_days_from_sunday())
}
