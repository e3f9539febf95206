//! Sparse value index keyed by grid offset, with a single-slot memo cache.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tracing::debug;

use crate::data_types::{AttrMap, DateValue, HeatmapConfig};
use crate::dates::normalize;
use crate::HeatmapError;

/// Everything precomputed for one value: the value itself plus the outputs
/// of the caller's classification/title/tooltip callbacks.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub value: DateValue,
    pub class_name: Option<String>,
    pub title: Option<String>,
    pub tooltip_attrs: Option<AttrMap>,
}

/// Maps day offsets from the padded range start to their annotations.
/// Offsets without a value have no entry; lookups fall back to the
/// callbacks' `None` results, captured once at build time.
pub struct ValueIndex {
    entries: HashMap<i64, IndexEntry>,
    empty_class: Option<String>,
    empty_title: Option<String>,
    empty_tooltip: Option<AttrMap>,
}

impl ValueIndex {
    /// Buckets every value to its day offset. Later values overwrite
    /// earlier ones landing on the same day.
    pub fn build(
        values: &[DateValue],
        padded_start: NaiveDate,
        config: &HeatmapConfig,
    ) -> Result<Self, HeatmapError> {
        let mut entries = HashMap::with_capacity(values.len());
        for value in values {
            let day = normalize(&value.date)?;
            let offset = (day - padded_start).num_days();
            entries.insert(
                offset,
                IndexEntry {
                    value: value.clone(),
                    class_name: (config.class_for_value)(Some(value)),
                    title: config
                        .title_for_value
                        .as_ref()
                        .and_then(|title_for| title_for(Some(value))),
                    tooltip_attrs: config
                        .tooltip_data_attrs
                        .as_ref()
                        .map(|tooltip| tooltip.resolve(Some(value))),
                },
            );
        }
        debug!(values = values.len(), days = entries.len(), "indexed values");
        Ok(Self {
            entries,
            empty_class: (config.class_for_value)(None),
            empty_title: config
                .title_for_value
                .as_ref()
                .and_then(|title_for| title_for(None)),
            empty_tooltip: config
                .tooltip_data_attrs
                .as_ref()
                .map(|tooltip| tooltip.resolve(None)),
        })
    }

    /// Number of distinct days carrying a value.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn value_at(&self, grid_index: i64) -> Option<&DateValue> {
        self.entries.get(&grid_index).map(|entry| &entry.value)
    }

    pub fn class_name_at(&self, grid_index: i64) -> Option<String> {
        match self.entries.get(&grid_index) {
            Some(entry) => entry.class_name.clone(),
            None => self.empty_class.clone(),
        }
    }

    pub fn title_at(&self, grid_index: i64) -> Option<String> {
        match self.entries.get(&grid_index) {
            Some(entry) => entry.title.clone(),
            None => self.empty_title.clone(),
        }
    }

    pub fn tooltip_at(&self, grid_index: i64) -> Option<AttrMap> {
        match self.entries.get(&grid_index) {
            Some(entry) => entry.tooltip_attrs.clone(),
            None => self.empty_tooltip.clone(),
        }
    }
}

/// Identity of the inputs a [`ValueIndex`] was built from: the values slice
/// (by reference, plus a digest of dates and counts so a reused allocation
/// with different content is not mistaken for the old one) and the padded
/// range start, the only layout-derived input the index depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexFingerprint {
    values_ptr: usize,
    values_len: usize,
    content_digest: u64,
    padded_start: NaiveDate,
}

impl IndexFingerprint {
    pub fn of(values: &[DateValue], padded_start: NaiveDate) -> Self {
        let mut hasher = DefaultHasher::new();
        for value in values {
            value.date.hash(&mut hasher);
            value.count.hash(&mut hasher);
        }
        Self {
            values_ptr: values.as_ptr() as usize,
            values_len: values.len(),
            content_digest: hasher.finish(),
            padded_start,
        }
    }
}

/// Single-slot cache: holds the most recent index and replaces it wholesale
/// whenever the fingerprint changes.
///
/// The fingerprint sees the values (identity plus their dates and counts)
/// and the padded start, not the annotation callbacks baked into the
/// entries. Callers driving [`render_tree`] with a long-lived cache must
/// [`clear`](IndexCache::clear) it when they replace those callbacks or
/// mutate value metadata in place.
///
/// [`render_tree`]: crate::rendering::render_tree
#[derive(Default)]
pub struct IndexCache {
    slot: Mutex<Option<(IndexFingerprint, Arc<ValueIndex>)>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the cached index; the next lookup rebuilds it.
    pub fn clear(&self) {
        *self.slot.lock() = None;
    }

    pub fn get_or_build(
        &self,
        fingerprint: IndexFingerprint,
        build: impl FnOnce() -> Result<ValueIndex, HeatmapError>,
    ) -> Result<Arc<ValueIndex>, HeatmapError> {
        let mut slot = self.slot.lock();
        if let Some((cached, index)) = slot.as_ref() {
            if *cached == fingerprint {
                return Ok(Arc::clone(index));
            }
        }
        debug!(?fingerprint, "value index cache miss");
        let index = Arc::new(build()?);
        *slot = Some((fingerprint, Arc::clone(&index)));
        Ok(index)
    }
}
