//! The `CalendarHeatmap` component: a configuration bundled with its own
//! value-index cache.

use std::sync::Arc;

use tracing::{debug, info};

use crate::data_types::{
    AttrMap, CellEvent, CellEventKind, DateStamp, DateValue, Direction, HeatmapConfig,
    Orientation, TooltipAttrs,
};
use crate::element::Element;
use crate::geometry::{LayoutGeometry, LayoutParams};
use crate::rendering::render_tree;
use crate::value_index::{IndexCache, IndexFingerprint, ValueIndex};
use crate::HeatmapError;

/// A calendar heatmap: date-tagged values rendered as a week-by-day grid of
/// colored squares.
///
/// Rendering is a pure function of the configuration; the only state is the
/// single-slot memo holding the previous render's value index, invalidated
/// whenever the values or the derived range change.
///
/// ```
/// use calendar_heatmap::{CalendarHeatmap, DateValue};
///
/// let heatmap = CalendarHeatmap::new(vec![DateValue::with_count("2022-11-15", 3)])
///     .start_date("2022-11-01")
///     .end_date("2022-11-30");
/// let svg = heatmap.render().unwrap().to_svg();
/// assert!(svg.starts_with("<svg"));
/// ```
pub struct CalendarHeatmap {
    config: HeatmapConfig,
    cache: IndexCache,
}

impl CalendarHeatmap {
    pub fn new(values: Vec<DateValue>) -> Self {
        info!(values = values.len(), "creating calendar heatmap");
        Self {
            config: HeatmapConfig {
                values,
                ..HeatmapConfig::default()
            },
            cache: IndexCache::new(),
        }
    }

    pub fn from_config(config: HeatmapConfig) -> Self {
        Self {
            config,
            cache: IndexCache::new(),
        }
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    pub fn start_date(mut self, stamp: impl Into<DateStamp>) -> Self {
        self.config.start_date = Some(stamp.into());
        self
    }

    pub fn end_date(mut self, stamp: impl Into<DateStamp>) -> Self {
        self.config.end_date = Some(stamp.into());
        self
    }

    pub fn gutter_size(mut self, gutter_size: i64) -> Self {
        self.config.gutter_size = gutter_size;
        self
    }

    pub fn horizontal(mut self, horizontal: bool) -> Self {
        self.config.orientation = if horizontal {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    pub fn show_month_labels(mut self, show: bool) -> Self {
        self.config.show_month_labels = show;
        self
    }

    pub fn show_weekday_labels(mut self, show: bool) -> Self {
        self.config.show_weekday_labels = show;
        self
    }

    pub fn show_out_of_range_days(mut self, show: bool) -> Self {
        self.config.show_out_of_range_days = show;
        self
    }

    pub fn month_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.month_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn weekday_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.weekday_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn class_for_value(
        mut self,
        class_for: impl Fn(Option<&DateValue>) -> Option<String> + 'static,
    ) -> Self {
        self.config.class_for_value = Box::new(class_for);
        // Cached index entries bake in the annotation outputs.
        self.cache.clear();
        self
    }

    pub fn title_for_value(
        mut self,
        title_for: impl Fn(Option<&DateValue>) -> Option<String> + 'static,
    ) -> Self {
        self.config.title_for_value = Some(Box::new(title_for));
        self.cache.clear();
        self
    }

    pub fn tooltip_data_attrs(mut self, attrs: AttrMap) -> Self {
        self.config.tooltip_data_attrs = Some(TooltipAttrs::Static(attrs));
        self.cache.clear();
        self
    }

    pub fn tooltip_data_attrs_fn(
        mut self,
        attrs_for: impl Fn(Option<&DateValue>) -> AttrMap + 'static,
    ) -> Self {
        self.config.tooltip_data_attrs = Some(TooltipAttrs::Computed(Box::new(attrs_for)));
        self.cache.clear();
        self
    }

    pub fn on_click(mut self, handler: impl Fn(&CellEvent, Option<&DateValue>) + 'static) -> Self {
        self.config.on_click = Some(Box::new(handler));
        self
    }

    pub fn on_mouse_over(
        mut self,
        handler: impl Fn(&CellEvent, Option<&DateValue>) + 'static,
    ) -> Self {
        self.config.on_mouse_over = Some(Box::new(handler));
        self
    }

    pub fn on_mouse_leave(
        mut self,
        handler: impl Fn(&CellEvent, Option<&DateValue>) + 'static,
    ) -> Self {
        self.config.on_mouse_leave = Some(Box::new(handler));
        self
    }

    pub fn transform_day_element(
        mut self,
        transform: impl Fn(Element, Option<&DateValue>, i64) -> Element + 'static,
    ) -> Self {
        self.config.transform_day_element = Some(Box::new(transform));
        self
    }

    /// The layout geometry for the current configuration.
    pub fn geometry(&self) -> Result<LayoutGeometry, HeatmapError> {
        Ok(LayoutGeometry::compute(LayoutParams::from_config(
            &self.config,
        )?))
    }

    /// Renders the visual tree.
    pub fn render(&self) -> Result<Element, HeatmapError> {
        render_tree(&self.config, &self.cache)
    }

    /// Routes a host input event to the matching caller callback, passing
    /// the value stored at the targeted cell (or `None`). Reuses the memoized
    /// value index when the inputs are unchanged since the last render.
    pub fn dispatch(&self, event: &CellEvent) -> Result<(), HeatmapError> {
        let handler = match event.kind {
            CellEventKind::Click => self.config.on_click.as_ref(),
            CellEventKind::MouseOver => self.config.on_mouse_over.as_ref(),
            CellEventKind::MouseLeave => self.config.on_mouse_leave.as_ref(),
        };
        let Some(handler) = handler else {
            debug!(?event, "no handler configured for event");
            return Ok(());
        };
        let index = self.value_index()?;
        handler(event, index.value_at(event.grid_index));
        Ok(())
    }

    fn value_index(&self) -> Result<Arc<ValueIndex>, HeatmapError> {
        let layout = self.geometry()?;
        self.cache.get_or_build(
            IndexFingerprint::of(&self.config.values, layout.padded_start()),
            || ValueIndex::build(&self.config.values, layout.padded_start(), &self.config),
        )
    }
}
