//! Calendar grid construction
//!
//! Walks the padded window one day at a time and emits a cell per day, the
//! month labels along the top edge and the weekday labels along the left edge.

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::classifier::classify;
use crate::metric::format_value;
use crate::types::{DayCell, DayLabel, GridDescriptor, MetricKind, MetricSeries, MonthLabel};
use crate::window::{DataWindow, WeekStart};

/// Rows of the weekday gutter that carry a visible label
const LABELLED_ROWS: [usize; 3] = [1, 3, 5];

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Builder for [`GridDescriptor`]s
pub struct GridBuilder;

impl GridBuilder {
    /// Build the grid for `metric` over `window`.
    ///
    /// Padding cells never carry a value, even when the series has one for
    /// that date.
    pub fn build(window: &DataWindow, series: &MetricSeries, metric: MetricKind) -> GridDescriptor {
        let week_start = window.week_start;
        let mut cells = Vec::with_capacity(window.len_days());
        let mut month_labels = Vec::new();
        let mut rows_present = [false; 7];
        let mut column = 0usize;

        for (index, date) in window.days().enumerate() {
            let weekday = date.weekday();
            if weekday == week_start.first_weekday() && index > 0 {
                column += 1;
            }

            let row = week_start.row_of(weekday);
            rows_present[row] = true;

            let is_padding = window.is_padding(date);
            let raw_value = if is_padding {
                None
            } else {
                series.value(date, metric)
            };

            if date.day() == 1 {
                month_labels.push(month_label(date, column, week_start));
            }

            cells.push(DayCell {
                date,
                raw_value,
                level: classify(raw_value, metric),
                value_label: format_value(raw_value, metric),
                is_padding,
                column,
                row,
            });
        }

        let columns = if cells.is_empty() { 0 } else { column + 1 };
        debug!(
            metric = %metric,
            cells = cells.len(),
            columns,
            months = month_labels.len(),
            "built heatmap grid"
        );

        GridDescriptor {
            cells,
            month_labels,
            day_labels: day_labels(week_start, &rows_present),
            columns,
        }
    }
}

/// Label for the month starting on `date`.
///
/// A first-of-month on the last row of a column sits under the previous
/// month's squares, so its label moves to the next column.
fn month_label(date: NaiveDate, column: usize, week_start: WeekStart) -> MonthLabel {
    let column = if date.weekday() == week_start.last_weekday() {
        column + 1
    } else {
        column
    };

    MonthLabel {
        month: date.month(),
        label: MONTH_NAMES[date.month0() as usize],
        column,
    }
}

fn day_labels(week_start: WeekStart, rows_present: &[bool; 7]) -> Vec<DayLabel> {
    week_start
        .weekdays()
        .into_iter()
        .enumerate()
        .filter(|(row, _)| rows_present[*row])
        .map(|(row, weekday)| {
            let name = weekday_name(weekday);
            DayLabel {
                row,
                weekday: name,
                label: LABELLED_ROWS.contains(&row).then_some(name),
            }
        })
        .collect()
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
