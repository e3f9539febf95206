//! Layout geometry engine.
//!
//! Everything here is a pure function of [`LayoutParams`]: week count, band
//! sizes, viewport extents and the coordinate transforms for weeks, cells
//! and label rows. All quantities are whole pixels, so identical inputs
//! produce bit-identical coordinates.
//!
//! The geometry is always computed along a canonical "weeks" axis; vertical
//! orientation swaps the two axes at presentation time, and direction
//! mirrors positions along the weeks axis (plus, for vertical orientation,
//! within the week).

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::data_types::{DateStamp, Direction, HeatmapConfig, Orientation};
use crate::dates::{normalize, shift, weekday_index};
use crate::HeatmapError;

pub const DAYS_IN_WEEK: i64 = 7;
pub const SQUARE_SIZE: i64 = 10;
pub const LABEL_GUTTER_SIZE: i64 = 4;
pub const HORIZONTAL_WEEKDAY_LABELS_SIZE: i64 = 30;
pub const VERTICAL_MONTH_LABELS_SIZE: i64 = 2 * (SQUARE_SIZE + LABEL_GUTTER_SIZE);

/// Number of days the range reaches back from the end date when no start
/// date is configured.
pub const DEFAULT_RANGE_DAYS: i64 = 200;

/// An inclusive day range, both endpoints truncated to their calendar day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Resolves optional endpoints to a concrete range; the end defaults to
    /// today, the start to [`DEFAULT_RANGE_DAYS`] before the end.
    pub fn resolve(
        start: Option<&DateStamp>,
        end: Option<&DateStamp>,
    ) -> Result<Self, HeatmapError> {
        let end = match end {
            Some(stamp) => normalize(stamp)?,
            None => Local::now().date_naive(),
        };
        let start = match start {
            Some(stamp) => normalize(stamp)?,
            None => shift(end, -DEFAULT_RANGE_DAYS),
        };
        Ok(Self { start, end })
    }

    /// Calendar days from start to end; zero for a single-day range,
    /// negative for an inverted one.
    pub fn day_span(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// The inputs the geometry is a function of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutParams {
    pub range: DateRange,
    pub orientation: Orientation,
    pub direction: Direction,
    pub gutter_size: i64,
    pub show_month_labels: bool,
    pub show_weekday_labels: bool,
}

impl LayoutParams {
    pub fn from_config(config: &HeatmapConfig) -> Result<Self, HeatmapError> {
        Ok(Self {
            range: DateRange::resolve(config.start_date.as_ref(), config.end_date.as_ref())?,
            orientation: config.orientation,
            direction: config.direction,
            gutter_size: config.gutter_size,
            show_month_labels: config.show_month_labels,
            show_weekday_labels: config.show_weekday_labels,
        })
    }
}

/// Fully derived layout: sizes, counts and coordinate transforms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutGeometry {
    params: LayoutParams,
    empty_days_at_start: i64,
    empty_days_at_end: i64,
    day_span: i64,
    week_count: i64,
    padded_start: NaiveDate,
}

impl LayoutGeometry {
    pub fn compute(params: LayoutParams) -> Self {
        let empty_days_at_start = weekday_index(params.range.start);
        let empty_days_at_end = DAYS_IN_WEEK - 1 - weekday_index(params.range.end);
        let day_span = params.range.day_span();
        // An inverted range renders as zero weeks rather than wrapping the
        // arithmetic around.
        let week_count = if day_span < 0 {
            0
        } else {
            let padded_days = day_span + 1 + empty_days_at_start + empty_days_at_end;
            (padded_days + DAYS_IN_WEEK - 1) / DAYS_IN_WEEK
        };
        Self {
            params,
            empty_days_at_start,
            empty_days_at_end,
            day_span,
            week_count,
            padded_start: shift(params.range.start, -empty_days_at_start),
        }
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    /// Day offset of the range start within its week (0 = the range starts
    /// on the first weekday).
    pub fn empty_days_at_start(&self) -> i64 {
        self.empty_days_at_start
    }

    pub fn empty_days_at_end(&self) -> i64 {
        self.empty_days_at_end
    }

    /// First rendered day: the range start rounded back to a week boundary.
    pub fn padded_start(&self) -> NaiveDate {
        self.padded_start
    }

    pub fn week_count(&self) -> i64 {
        self.week_count
    }

    pub fn square_step(&self) -> i64 {
        SQUARE_SIZE + self.params.gutter_size
    }

    pub fn week_height(&self) -> i64 {
        DAYS_IN_WEEK * self.square_step()
    }

    /// Pixel extent reserved for month labels, before the weeks band.
    pub fn month_label_band(&self) -> i64 {
        if !self.params.show_month_labels {
            return 0;
        }
        match self.params.orientation {
            Orientation::Horizontal => SQUARE_SIZE + LABEL_GUTTER_SIZE,
            Orientation::Vertical => VERTICAL_MONTH_LABELS_SIZE,
        }
    }

    /// Pixel extent reserved for weekday labels.
    pub fn weekday_label_band(&self) -> i64 {
        if !self.params.show_weekday_labels {
            return 0;
        }
        match self.params.orientation {
            Orientation::Horizontal => HORIZONTAL_WEEKDAY_LABELS_SIZE,
            Orientation::Vertical => SQUARE_SIZE * 3 / 2,
        }
    }

    /// Extent along the weeks axis, regardless of final orientation.
    pub fn width(&self) -> i64 {
        self.week_count * self.square_step() + self.weekday_label_band() + LABEL_GUTTER_SIZE * 2
    }

    /// Extent across the weeks axis.
    pub fn height(&self) -> i64 {
        let padding = match self.params.orientation {
            Orientation::Horizontal => LABEL_GUTTER_SIZE,
            Orientation::Vertical => LABEL_GUTTER_SIZE * 2,
        };
        self.week_height() + self.month_label_band() + padding
    }

    /// SVG viewBox, axes swapped for vertical orientation.
    pub fn view_box(&self) -> String {
        match self.params.orientation {
            Orientation::Horizontal => format!("0 0 {} {}", self.width(), self.height()),
            Orientation::Vertical => format!("0 0 {} {}", self.height(), self.width()),
        }
    }

    /// Origin of one week's group, relative to the all-weeks group.
    pub fn week_transform(&self, week_index: i64) -> (i64, i64) {
        match self.params.orientation {
            Orientation::Horizontal => {
                let position = self
                    .params
                    .direction
                    .week_position(week_index, self.week_count);
                (position * self.square_step(), 0)
            }
            // Vertical weeks always run top to bottom; direction mirrors
            // days within the week instead.
            Orientation::Vertical => (0, week_index * self.square_step()),
        }
    }

    /// Origin of the group holding every week; label rows are positioned
    /// relative to this.
    pub fn all_weeks_transform(&self) -> (i64, i64) {
        let weekday_band = self.weekday_label_band();
        let month_band = self.month_label_band();
        match self.params.orientation {
            Orientation::Horizontal => {
                let x = if self.params.direction.is_rtl() {
                    0
                } else {
                    weekday_band
                };
                (x + LABEL_GUTTER_SIZE, month_band)
            }
            Orientation::Vertical => {
                let x = if self.params.direction.is_rtl() {
                    month_band
                } else {
                    0
                };
                let y = if weekday_band > 0 {
                    weekday_band
                } else {
                    LABEL_GUTTER_SIZE
                };
                (x + LABEL_GUTTER_SIZE, y)
            }
        }
    }

    /// Origin of the weekday-label group.
    pub fn weekday_labels_transform(&self) -> (i64, i64) {
        let (all_weeks_x, _) = self.all_weeks_transform();
        match self.params.orientation {
            Orientation::Horizontal => {
                let x = if self.params.direction.is_rtl() {
                    all_weeks_x + self.week_count * self.square_step() + LABEL_GUTTER_SIZE
                } else {
                    HORIZONTAL_WEEKDAY_LABELS_SIZE
                };
                (x, self.month_label_band())
            }
            Orientation::Vertical => (all_weeks_x, 0),
        }
    }

    /// Origin of the month-label group.
    pub fn month_labels_transform(&self) -> (i64, i64) {
        let (all_weeks_x, all_weeks_y) = self.all_weeks_transform();
        match self.params.orientation {
            Orientation::Horizontal => (all_weeks_x, 0),
            Orientation::Vertical => {
                let x = if self.params.direction.is_rtl() {
                    all_weeks_x - LABEL_GUTTER_SIZE
                } else {
                    self.week_height() + all_weeks_x + LABEL_GUTTER_SIZE
                };
                (x, all_weeks_y)
            }
        }
    }

    /// Cell origin within its week group.
    pub fn cell_coordinates(&self, day_index: i64) -> (i64, i64) {
        match self.params.orientation {
            Orientation::Horizontal => (0, day_index * self.square_step()),
            Orientation::Vertical => (
                self.params.direction.day_position(day_index) * self.square_step(),
                0,
            ),
        }
    }

    /// Anchor of one weekday label within the weekday-label group.
    pub fn weekday_label_coordinates(&self, day_index: i64) -> (i64, i64) {
        match self.params.orientation {
            Orientation::Horizontal => (
                0,
                (day_index + 1) * SQUARE_SIZE + day_index * self.params.gutter_size,
            ),
            Orientation::Vertical => {
                let position = if self.params.direction.is_rtl() {
                    DAYS_IN_WEEK - day_index
                } else {
                    day_index
                };
                let rtl_inset = if self.params.direction.is_rtl() {
                    self.params.gutter_size
                } else {
                    0
                };
                (position * self.square_step() - rtl_inset, SQUARE_SIZE)
            }
        }
    }

    /// Anchor of the month label attached to `week_index`.
    pub fn month_label_coordinates(&self, week_index: i64) -> (i64, i64) {
        match self.params.orientation {
            Orientation::Horizontal => {
                // The last week never carries a label, so mirroring works
                // over one week less than the full count.
                let total = self.week_count - 1;
                let x = if self.params.direction.is_rtl() {
                    (total - week_index + 1) * self.square_step() - self.params.gutter_size
                } else {
                    week_index * self.square_step()
                };
                (x, self.month_label_band() - LABEL_GUTTER_SIZE)
            }
            Orientation::Vertical => (0, (week_index + 1) * self.square_step() - 2),
        }
    }

    /// The day that decides whether `week_index` carries a month label: the
    /// padded start of the following week. A label is emitted when that day
    /// falls within the first week of a month, i.e. a month boundary
    /// occurred during this week. The last week is never checked because
    /// its label would be clipped.
    pub fn month_boundary(&self, week_index: i64) -> Option<NaiveDate> {
        use chrono::Datelike;

        if week_index < 0 || week_index >= self.week_count - 1 {
            return None;
        }
        let boundary = shift(self.padded_start, (week_index + 1) * DAYS_IN_WEEK);
        if i64::from(boundary.day()) <= DAYS_IN_WEEK {
            Some(boundary)
        } else {
            None
        }
    }

    /// Whether the cell at `grid_index` falls inside the requested range
    /// (as opposed to week-rounding padding).
    pub fn cell_in_range(&self, grid_index: i64) -> bool {
        grid_index >= self.empty_days_at_start
            && grid_index <= self.empty_days_at_start + self.day_span
    }
}
