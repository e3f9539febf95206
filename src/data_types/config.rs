use serde::{Deserialize, Serialize};

use super::value::{DateStamp, DateValue, TooltipAttrs};
use crate::element::Element;

/// Default month labels, January through December.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Default weekday labels, index 0 = Sunday. Odd positions are blank because
/// only every other label is rendered.
pub const DAY_LABELS: [&str; 7] = ["", "Mon", "", "Wed", "", "Fri", ""];

/// Grid orientation: weeks run along the x axis (horizontal) or y axis
/// (vertical).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

/// Reading direction of the weeks axis. Rtl mirrors week ordering, and for
/// vertical orientation also the within-week day ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// Week position along the weeks axis, mirrored for Rtl.
    pub fn week_position(self, week_index: i64, total_weeks: i64) -> i64 {
        match self {
            Self::Ltr => week_index,
            Self::Rtl => total_weeks - week_index - 1,
        }
    }

    /// Day position within a week, mirrored for Rtl.
    pub fn day_position(self, day_index: i64) -> i64 {
        match self {
            Self::Ltr => day_index,
            Self::Rtl => crate::geometry::DAYS_IN_WEEK - day_index - 1,
        }
    }
}

/// Interaction kinds delivered by the host to [`CalendarHeatmap::dispatch`].
///
/// [`CalendarHeatmap::dispatch`]: crate::CalendarHeatmap::dispatch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellEventKind {
    Click,
    MouseOver,
    MouseLeave,
}

/// A host input event targeting one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellEvent {
    pub kind: CellEventKind,
    pub grid_index: i64,
}

impl CellEvent {
    pub fn click(grid_index: i64) -> Self {
        Self {
            kind: CellEventKind::Click,
            grid_index,
        }
    }

    pub fn mouse_over(grid_index: i64) -> Self {
        Self {
            kind: CellEventKind::MouseOver,
            grid_index,
        }
    }

    pub fn mouse_leave(grid_index: i64) -> Self {
        Self {
            kind: CellEventKind::MouseLeave,
            grid_index,
        }
    }
}

/// Maps a value (or `None` for an empty cell) to a CSS class.
pub type ClassForValue = Box<dyn Fn(Option<&DateValue>) -> Option<String>>;

/// Maps a value (or `None`) to a cell title.
pub type TitleForValue = Box<dyn Fn(Option<&DateValue>) -> Option<String>>;

/// Invoked by [`dispatch`](crate::CalendarHeatmap::dispatch) with the event
/// and the value stored at the targeted cell, if any.
pub type EventHandler = Box<dyn Fn(&CellEvent, Option<&DateValue>)>;

/// Post-processes a rendered cell element.
pub type TransformDayElement = Box<dyn Fn(Element, Option<&DateValue>, i64) -> Element>;

pub fn default_class_for_value(value: Option<&DateValue>) -> Option<String> {
    let class = if value.is_some() {
        "color-filled"
    } else {
        "color-empty"
    };
    Some(class.to_owned())
}

/// Full configuration of a heatmap. Every field except `values` has a
/// default matching the original component's behavior.
pub struct HeatmapConfig {
    pub values: Vec<DateValue>,
    /// Defaults to 200 days before the end date.
    pub start_date: Option<DateStamp>,
    /// Defaults to today.
    pub end_date: Option<DateStamp>,
    /// Spacing between squares, in pixels.
    pub gutter_size: i64,
    pub orientation: Orientation,
    pub direction: Direction,
    pub show_month_labels: bool,
    pub show_weekday_labels: bool,
    /// Render padding cells before the start date and after the end date.
    pub show_out_of_range_days: bool,
    pub month_labels: Vec<String>,
    pub weekday_labels: Vec<String>,
    pub class_for_value: ClassForValue,
    pub title_for_value: Option<TitleForValue>,
    pub tooltip_data_attrs: Option<TooltipAttrs>,
    pub on_click: Option<EventHandler>,
    pub on_mouse_over: Option<EventHandler>,
    pub on_mouse_leave: Option<EventHandler>,
    pub transform_day_element: Option<TransformDayElement>,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            start_date: None,
            end_date: None,
            gutter_size: 1,
            orientation: Orientation::Horizontal,
            direction: Direction::Ltr,
            show_month_labels: true,
            show_weekday_labels: false,
            show_out_of_range_days: false,
            month_labels: MONTH_LABELS.iter().map(|s| (*s).to_owned()).collect(),
            weekday_labels: DAY_LABELS.iter().map(|s| (*s).to_owned()).collect(),
            class_for_value: Box::new(default_class_for_value),
            title_for_value: None,
            tooltip_data_attrs: None,
            on_click: None,
            on_mouse_over: None,
            on_mouse_leave: None,
            transform_day_element: None,
        }
    }
}
