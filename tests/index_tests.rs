use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use calendar_heatmap::{
    AttrMap, DateValue, HeatmapConfig, IndexCache, IndexFingerprint, TooltipAttrs, ValueIndex,
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn buckets_values_by_day_offset() {
    let values = vec![
        DateValue::new(date(2022, 11, 1)),
        DateValue::new(date(2022, 11, 15)),
    ];
    // Padded start two days before the range start.
    let index = ValueIndex::build(&values, date(2022, 10, 30), &HeatmapConfig::default()).unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(index.value_at(2), Some(&values[0]));
    assert_eq!(index.value_at(16), Some(&values[1]));
    assert_eq!(index.value_at(3), None);
}

#[test]
fn duplicate_dates_keep_the_last_value() {
    let values = vec![
        DateValue::with_count(date(2022, 11, 1), 1),
        DateValue::with_count(date(2022, 11, 1), 7),
    ];
    let index = ValueIndex::build(&values, date(2022, 10, 30), &HeatmapConfig::default()).unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.value_at(2).and_then(|v| v.count), Some(7));
}

#[test]
fn dates_before_the_padded_start_stay_out_of_the_grid() {
    let values = vec![DateValue::new(date(2022, 10, 1))];
    let index = ValueIndex::build(&values, date(2022, 10, 30), &HeatmapConfig::default()).unwrap();

    // Stored at a negative offset; no non-negative grid index sees it.
    assert_eq!(index.len(), 1);
    for grid_index in 0..60 {
        assert_eq!(index.value_at(grid_index), None);
    }
}

#[test]
fn lookups_fall_back_to_the_empty_annotations() {
    let mut config = HeatmapConfig::default();
    config.title_for_value = Some(Box::new(|value| match value {
        Some(_) => Some("busy".to_owned()),
        None => Some("nothing".to_owned()),
    }));
    config.tooltip_data_attrs = Some(TooltipAttrs::Computed(Box::new(|value| {
        let mut attrs = AttrMap::new();
        attrs.insert(
            "data-tooltip".to_owned(),
            if value.is_some() { "yes" } else { "no" }.to_owned(),
        );
        attrs
    })));
    config.values = vec![DateValue::new(date(2022, 11, 1))];

    let index = ValueIndex::build(&config.values, date(2022, 10, 30), &config).unwrap();

    assert_eq!(index.class_name_at(2).as_deref(), Some("color-filled"));
    assert_eq!(index.class_name_at(3).as_deref(), Some("color-empty"));
    assert_eq!(index.title_at(2).as_deref(), Some("busy"));
    assert_eq!(index.title_at(3).as_deref(), Some("nothing"));
    assert_eq!(
        index.tooltip_at(2).unwrap().get("data-tooltip").map(String::as_str),
        Some("yes")
    );
    assert_eq!(
        index.tooltip_at(3).unwrap().get("data-tooltip").map(String::as_str),
        Some("no")
    );
}

#[test]
fn absent_callbacks_leave_annotations_empty() {
    let config = HeatmapConfig::default();
    let index = ValueIndex::build(&[], date(2022, 10, 30), &config).unwrap();
    assert!(index.is_empty());
    assert_eq!(index.title_at(0), None);
    assert_eq!(index.tooltip_at(0), None);
}

#[test]
fn values_deserialize_from_json() {
    use calendar_heatmap::DateStamp;

    let values: Vec<DateValue> = serde_json::from_str(
        r#"[
            {"date": "2016-01-01", "count": 3, "project": "alpha"},
            {"date": 1451736000000},
            {"date": "2016-01-03T08:00:00+01:00"}
        ]"#,
    )
    .unwrap();

    assert_eq!(values[0].date, DateStamp::Date(date(2016, 1, 1)));
    assert_eq!(values[0].count, Some(3));
    assert_eq!(
        values[0].meta.get("project").and_then(|v| v.as_str()),
        Some("alpha")
    );
    assert_eq!(values[1].date, DateStamp::EpochMillis(1_451_736_000_000));
    assert_eq!(
        values[2].date,
        DateStamp::Iso("2016-01-03T08:00:00+01:00".to_owned())
    );
}

#[test]
fn cache_reuses_the_index_for_an_unchanged_fingerprint() {
    let values = vec![DateValue::new(date(2022, 11, 1))];
    let config = HeatmapConfig::default();
    let cache = IndexCache::new();
    let builds = Rc::new(Cell::new(0));

    let padded_start = date(2022, 10, 30);
    let build = |padded: NaiveDate| {
        let builds = Rc::clone(&builds);
        let values = &values;
        let config = &config;
        move || {
            builds.set(builds.get() + 1);
            ValueIndex::build(values, padded, config)
        }
    };

    let first = cache
        .get_or_build(IndexFingerprint::of(&values, padded_start), build(padded_start))
        .unwrap();
    let second = cache
        .get_or_build(IndexFingerprint::of(&values, padded_start), build(padded_start))
        .unwrap();

    assert!(Arc::ptr_eq(&first, &second), "memo hit must return the same index");
    assert_eq!(builds.get(), 1);

    // A different padded start invalidates the slot.
    let moved = date(2022, 10, 23);
    let third = cache
        .get_or_build(IndexFingerprint::of(&values, moved), build(moved))
        .unwrap();
    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(builds.get(), 2);

    // So does a different values allocation, even with equal contents.
    let cloned = values.clone();
    cache
        .get_or_build(IndexFingerprint::of(&cloned, moved), build(moved))
        .unwrap();
    assert_eq!(builds.get(), 3);
}

#[test]
fn fingerprint_sees_content_changes_within_the_same_allocation() {
    let padded_start = date(2022, 10, 30);
    let mut values = vec![
        DateValue::with_count(date(2022, 11, 1), 1),
        DateValue::new(date(2022, 11, 15)),
    ];
    let original = IndexFingerprint::of(&values, padded_start);
    assert_eq!(original, IndexFingerprint::of(&values, padded_start));

    // Same pointer and length, different date.
    values[1] = DateValue::new(date(2022, 11, 16));
    assert_ne!(original, IndexFingerprint::of(&values, padded_start));

    // Same pointer and length, different count.
    values[1] = DateValue::new(date(2022, 11, 15));
    values[0] = DateValue::with_count(date(2022, 11, 1), 2);
    assert_ne!(original, IndexFingerprint::of(&values, padded_start));
}
