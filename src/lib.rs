//! calendar_heatmap crate for rendering daily activity as a heatmap calendar

use thiserror::Error;

pub mod data_types;
pub mod dates;
pub mod element;
pub mod geometry;
pub mod heatmap;
pub mod rendering;
pub mod value_index;

pub use data_types::{
    AttrMap, CellEvent, CellEventKind, DateStamp, DateValue, Direction, HeatmapConfig,
    Orientation, TooltipAttrs,
};
pub use element::{css_class, Element, CSS_NAMESPACE};
pub use geometry::{DateRange, LayoutGeometry, LayoutParams};
pub use heatmap::CalendarHeatmap;
pub use rendering::render_tree;
pub use value_index::{IndexCache, IndexFingerprint, ValueIndex};

/// Failures surfaced to the caller. All of them are synchronous and local
/// to a single render pass.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum HeatmapError {
    /// A date was not an ISO string, epoch milliseconds, or date object.
    #[error("invalid date kind: {0}")]
    InvalidDateKind(String),
}
