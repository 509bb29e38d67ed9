//! Core types for the heatmap engine
//!
//! This module defines the data that flows through each stage of a render:
//! the sparse input series, the per-day grid cells, legend entries and the
//! aggregate summary handed to the rendering layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::HeatmapError;
use crate::window::DataWindow;

/// Ordinal display bucket. Level 0 always means "no data".
pub type IntensityLevel = u8;

/// Tracked health dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Sleep,
    Steps,
    Activity,
    Mood,
}

impl MetricKind {
    /// All metrics in dashboard order
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Sleep,
        MetricKind::Steps,
        MetricKind::Activity,
        MetricKind::Mood,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Sleep => "sleep",
            MetricKind::Steps => "steps",
            MetricKind::Activity => "activity",
            MetricKind::Mood => "mood",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sleep" => Ok(MetricKind::Sleep),
            "steps" => Ok(MetricKind::Steps),
            "activity" => Ok(MetricKind::Activity),
            "mood" => Ok(MetricKind::Mood),
            other => Err(HeatmapError::UnknownMetric(other.to_string())),
        }
    }
}

/// Metric values recorded for one calendar day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Sleep score (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep: Option<f64>,
    /// Step count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<f64>,
    /// Active minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<f64>,
    /// Mood on a 1-7 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<f64>,
}

impl DayRecord {
    pub fn value(&self, metric: MetricKind) -> Option<f64> {
        match metric {
            MetricKind::Sleep => self.sleep,
            MetricKind::Steps => self.steps,
            MetricKind::Activity => self.activity,
            MetricKind::Mood => self.mood,
        }
    }

    pub fn set(&mut self, metric: MetricKind, value: Option<f64>) {
        let slot = match metric {
            MetricKind::Sleep => &mut self.sleep,
            MetricKind::Steps => &mut self.steps,
            MetricKind::Activity => &mut self.activity,
            MetricKind::Mood => &mut self.mood,
        };
        *slot = value;
    }
}

/// Sparse, date-keyed series of daily records.
///
/// A missing date and a missing field on a present date both read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSeries {
    days: BTreeMap<NaiveDate, DayRecord>,
}

impl MetricSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `date`
    pub fn insert(&mut self, date: NaiveDate, record: DayRecord) {
        self.days.insert(date, record);
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DayRecord> {
        self.days.get(&date)
    }

    /// Value of `metric` on `date`, if recorded
    pub fn value(&self, date: NaiveDate, metric: MetricKind) -> Option<f64> {
        self.days.get(&date).and_then(|record| record.value(metric))
    }

    /// Number of date keys in the series, with or without data for any metric
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DayRecord)> {
        self.days.iter()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }
}

impl FromIterator<(NaiveDate, DayRecord)> for MetricSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, DayRecord)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

/// One square of the calendar grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub raw_value: Option<f64>,
    pub level: IntensityLevel,
    /// Tooltip text for the raw value, "No data" when absent
    pub value_label: String,
    /// Inside the week-aligned grid but outside the true data window
    pub is_padding: bool,
    /// Week column (0-based, left to right)
    pub column: usize,
    /// Row within the week under the active week-start convention
    pub row: usize,
}

/// Month name placed above the column holding that month's first day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthLabel {
    /// Calendar month (1-12)
    pub month: u32,
    pub label: &'static str,
    pub column: usize,
}

/// Row label on the left edge of the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayLabel {
    pub row: usize,
    pub weekday: &'static str,
    /// Visible text; only alternating rows carry one
    pub label: Option<&'static str>,
}

/// Calendar grid for one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridDescriptor {
    /// Cells in chronological order, 7 per column
    pub cells: Vec<DayCell>,
    pub month_labels: Vec<MonthLabel>,
    pub day_labels: Vec<DayLabel>,
    /// Number of week columns
    pub columns: usize,
}

/// One legend swatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub level: IntensityLevel,
    pub range_label: &'static str,
    pub color: &'static str,
}

/// Averages and level counts over the non-padding cells of a grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSummary {
    /// Unrounded mean over days with data
    pub average: Option<f64>,
    pub days_with_data: usize,
    /// Count of days at each level, every level of the metric present
    pub distribution: BTreeMap<IntensityLevel, usize>,
}

/// Share of one level, as drawn in the distribution chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSlice {
    pub level: IntensityLevel,
    pub range_label: &'static str,
    pub color: &'static str,
    pub count: usize,
    /// `count / total days in the series * 100`
    pub percentage: f64,
}

/// Everything a renderer needs to draw one metric's heatmap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapPayload {
    pub metric: MetricKind,
    pub display_name: &'static str,
    pub window: DataWindow,
    pub grid: GridDescriptor,
    pub legend: Vec<LegendEntry>,
    pub summary: AggregateSummary,
    /// Formatted average, absent when no day has data
    pub average_label: Option<String>,
    pub distribution: Vec<DistributionSlice>,
}
