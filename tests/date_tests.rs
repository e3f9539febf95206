use calendar_heatmap::dates::{
    day_difference, end_of_day, iso_date, normalize, shift, start_of_day, weekday_index,
};
use calendar_heatmap::{DateStamp, HeatmapError};
use chrono::{Datelike, Local, NaiveDate, Timelike};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn normalize_accepts_iso_dates() {
    let day = normalize(&DateStamp::Iso("2022-11-01".into())).unwrap();
    assert_eq!(day, date(2022, 11, 1));
}

#[test]
fn normalize_accepts_rfc3339_stamps() {
    let day = normalize(&DateStamp::Iso("2022-11-01T15:30:00+02:00".into())).unwrap();
    assert_eq!(day, date(2022, 11, 1), "should keep the stamp's own calendar day");
}

#[test]
fn normalize_accepts_date_objects() {
    let day = normalize(&DateStamp::Date(date(2019, 2, 28))).unwrap();
    assert_eq!(day, date(2019, 2, 28));
}

#[test]
fn normalize_truncates_epoch_millis_to_the_local_day() {
    let now = Local::now();
    let day = normalize(&DateStamp::EpochMillis(now.timestamp_millis())).unwrap();
    assert_eq!(day, now.date_naive());
}

#[test]
fn normalize_rejects_malformed_iso() {
    let err = normalize(&DateStamp::Iso("yesterday-ish".into())).unwrap_err();
    assert_eq!(err, HeatmapError::InvalidDateKind("yesterday-ish".into()));
}

#[test]
fn shift_rolls_over_month_and_year_boundaries() {
    assert_eq!(shift(date(2022, 1, 31), 1), date(2022, 2, 1));
    assert_eq!(shift(date(2022, 12, 31), 1), date(2023, 1, 1));
    assert_eq!(shift(date(2023, 1, 1), -1), date(2022, 12, 31));
    // leap day
    assert_eq!(shift(date(2020, 2, 28), 1), date(2020, 2, 29));
    assert_eq!(shift(date(2021, 2, 28), 1), date(2021, 3, 1));
}

#[test]
fn shift_by_many_days() {
    assert_eq!(shift(date(2022, 11, 1), -200), date(2022, 4, 15));
}

#[test]
fn day_difference_counts_calendar_days() {
    let a = DateStamp::Iso("2022-11-01".into());
    let b = DateStamp::Iso("2022-11-30".into());
    assert_eq!(day_difference(&a, &a).unwrap(), 0);
    assert_eq!(day_difference(&a, &b).unwrap(), 29);
    assert_eq!(day_difference(&b, &a).unwrap(), -29);
}

#[test]
fn day_difference_ignores_time_of_day() {
    let morning = DateStamp::Iso("2022-11-01T00:30:00+00:00".into());
    let evening = DateStamp::Iso("2022-11-02T23:30:00+00:00".into());
    assert_eq!(day_difference(&morning, &evening).unwrap(), 1);
}

#[test]
fn day_boundaries() {
    let day = date(2022, 11, 1);
    let start = start_of_day(day);
    let end = end_of_day(day);
    assert_eq!(start.date(), day);
    assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
    assert_eq!(end.date(), day, "end of day stays on the same calendar day");
    assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
    assert!(end > start);
}

#[test]
fn weekday_index_is_zero_for_sunday() {
    // 2022-10-02 was a Sunday
    let sunday = date(2022, 10, 2);
    assert_eq!(sunday.weekday().num_days_from_sunday(), 0);
    assert_eq!(weekday_index(sunday), 0);
    assert_eq!(weekday_index(date(2022, 10, 1)), 6, "Saturday is the last weekday");
}

#[test]
fn date_n_days_ago_counts_back_from_today() {
    let before = Local::now().date_naive();
    let ago = calendar_heatmap::dates::date_n_days_ago(10);
    let after = Local::now().date_naive();
    assert!(ago >= shift(before, -10) && ago <= shift(after, -10));
}

#[test]
fn iso_date_format() {
    assert_eq!(iso_date(date(2022, 3, 7)), "2022-03-07");
}
