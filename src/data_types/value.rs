use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Any of the accepted date representations for values and range endpoints.
#[derive(Clone, Debug, PartialEq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateStamp {
    /// Calendar date, e.g. deserialized from `"2022-11-01"`.
    Date(NaiveDate),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// ISO calendar string or full RFC 3339 timestamp.
    Iso(String),
}

impl From<NaiveDate> for DateStamp {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<&str> for DateStamp {
    fn from(text: &str) -> Self {
        Self::Iso(text.to_owned())
    }
}

impl From<i64> for DateStamp {
    fn from(ms: i64) -> Self {
        Self::EpochMillis(ms)
    }
}

/// One day's worth of activity: a date plus whatever the caller attaches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub date: DateStamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    /// Arbitrary extra fields, kept verbatim for the caller's callbacks.
    #[serde(flatten)]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

impl DateValue {
    pub fn new(date: impl Into<DateStamp>) -> Self {
        Self {
            date: date.into(),
            count: None,
            meta: serde_json::Map::new(),
        }
    }

    pub fn with_count(date: impl Into<DateStamp>, count: i64) -> Self {
        Self {
            date: date.into(),
            count: Some(count),
            meta: serde_json::Map::new(),
        }
    }
}

/// Extra attributes attached to a cell, typically consumed by a third-party
/// tooltip system (e.g. `data-tooltip`). Ordered so serialized markup is
/// deterministic.
pub type AttrMap = BTreeMap<String, String>;

/// Tooltip attributes are either one static map shared by every cell or
/// computed per value (`None` = cell without data).
pub enum TooltipAttrs {
    Static(AttrMap),
    Computed(Box<dyn Fn(Option<&DateValue>) -> AttrMap>),
}

impl TooltipAttrs {
    pub fn resolve(&self, value: Option<&DateValue>) -> AttrMap {
        match self {
            Self::Static(attrs) => attrs.clone(),
            Self::Computed(f) => f(value),
        }
    }
}
