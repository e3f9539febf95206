//! Render composition: walks the geometry and the value index to build the
//! visual tree.

use crate::data_types::HeatmapConfig;
use crate::element::{css_class, Element, Group, Rect, SvgRoot, Text, CSS_NAMESPACE};
use crate::geometry::{LayoutGeometry, LayoutParams, DAYS_IN_WEEK, SQUARE_SIZE};
use crate::value_index::{IndexCache, IndexFingerprint, ValueIndex};
use crate::HeatmapError;

/// Builds the full tree for a configuration. The cache is injected by the
/// caller and holds at most the previous render's value index.
pub fn render_tree(config: &HeatmapConfig, cache: &IndexCache) -> Result<Element, HeatmapError> {
    let layout = LayoutGeometry::compute(LayoutParams::from_config(config)?);
    let index = cache.get_or_build(
        IndexFingerprint::of(&config.values, layout.padded_start()),
        || ValueIndex::build(&config.values, layout.padded_start(), config),
    )?;

    Ok(Element::Svg(SvgRoot {
        class: CSS_NAMESPACE.to_owned(),
        view_box: layout.view_box(),
        direction: config.direction,
        children: vec![
            month_labels_group(config, &layout),
            all_weeks_group(config, &layout, &index),
            weekday_labels_group(config, &layout),
        ],
    }))
}

fn all_weeks_group(
    config: &HeatmapConfig,
    layout: &LayoutGeometry,
    index: &ValueIndex,
) -> Element {
    let weeks = (0..layout.week_count())
        .map(|week_index| render_week(config, layout, index, week_index))
        .collect();
    Element::Group(Group {
        class: css_class("all-weeks"),
        transform: layout.all_weeks_transform(),
        text_anchor: None,
        children: weeks,
    })
}

fn render_week(
    config: &HeatmapConfig,
    layout: &LayoutGeometry,
    index: &ValueIndex,
    week_index: i64,
) -> Element {
    let cells = (0..DAYS_IN_WEEK)
        .filter_map(|day_index| render_cell(config, layout, index, week_index, day_index))
        .collect();
    Element::Group(Group {
        class: css_class("week"),
        transform: layout.week_transform(week_index),
        text_anchor: None,
        children: cells,
    })
}

/// One day cell, or `None` when the grid index falls in the week-rounding
/// padding and out-of-range days are hidden.
fn render_cell(
    config: &HeatmapConfig,
    layout: &LayoutGeometry,
    index: &ValueIndex,
    week_index: i64,
    day_index: i64,
) -> Option<Element> {
    let grid_index = week_index * DAYS_IN_WEEK + day_index;
    if !layout.cell_in_range(grid_index) && !config.show_out_of_range_days {
        return None;
    }
    let (x, y) = layout.cell_coordinates(day_index);
    let element = Element::Rect(Rect {
        x,
        y,
        width: SQUARE_SIZE,
        height: SQUARE_SIZE,
        class: index.class_name_at(grid_index),
        title: index.title_at(grid_index),
        attrs: index.tooltip_at(grid_index).unwrap_or_default(),
        grid_index,
    });
    Some(match &config.transform_day_element {
        Some(transform) => transform(element, index.value_at(grid_index), grid_index),
        None => element,
    })
}

fn month_labels_group(config: &HeatmapConfig, layout: &LayoutGeometry) -> Element {
    use chrono::Datelike;

    let mut labels = Vec::new();
    if config.show_month_labels {
        for week_index in 0..(layout.week_count() - 1).max(0) {
            let Some(boundary) = layout.month_boundary(week_index) else {
                continue;
            };
            let (x, y) = layout.month_label_coordinates(week_index);
            labels.push(Element::Text(Text {
                x,
                y,
                class: css_class("month-label"),
                content: config
                    .month_labels
                    .get(boundary.month0() as usize)
                    .cloned()
                    .unwrap_or_default(),
            }));
        }
    }
    Element::Group(Group {
        class: css_class("month-labels"),
        transform: layout.month_labels_transform(),
        text_anchor: None,
        children: labels,
    })
}

fn weekday_labels_group(config: &HeatmapConfig, layout: &LayoutGeometry) -> Element {
    let horizontal = config.orientation.is_horizontal();
    let mut labels = Vec::new();
    if config.show_weekday_labels {
        // Only even weekday positions carry a label.
        for (day_index, label) in config.weekday_labels.iter().take(7).enumerate() {
            if day_index % 2 != 0 {
                continue;
            }
            let (x, y) = layout.weekday_label_coordinates(day_index as i64);
            let class = if horizontal {
                css_class("weekday-label")
            } else {
                format!("{} {}", css_class("small-text"), css_class("weekday-label"))
            };
            labels.push(Element::Text(Text {
                x,
                y,
                class,
                content: label.clone(),
            }));
        }
    }
    Element::Group(Group {
        class: css_class("weekday-labels"),
        transform: layout.weekday_labels_transform(),
        text_anchor: Some(if horizontal { "end" } else { "start" }),
        children: labels,
    })
}
