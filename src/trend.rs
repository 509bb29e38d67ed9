//! Recent-days trend series
//!
//! Data for the multi-metric line chart under the heatmaps. Steps and mood
//! are rescaled so all four metrics share one axis.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::config::{check_range, MAX_TREND_DAYS};
use crate::error::HeatmapError;
use crate::types::{MetricKind, MetricSeries};

/// One line of the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendDataset {
    pub metric: MetricKind,
    pub label: &'static str,
    /// Multiplier applied to raw values
    pub scale: f64,
    /// One value per date, `None` where the day has no data
    pub values: Vec<Option<f64>>,
}

/// Trend chart data covering `today - days ..= today`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    pub dates: Vec<NaiveDate>,
    pub datasets: Vec<TrendDataset>,
}

/// Chart label and scale for a metric
pub fn chart_scale(metric: MetricKind) -> (&'static str, f64) {
    match metric {
        MetricKind::Sleep => ("Sleep Score", 1.0),
        MetricKind::Steps => ("Steps (÷100)", 0.01),
        MetricKind::Activity => ("Activity (min)", 1.0),
        MetricKind::Mood => ("Mood (×10)", 10.0),
    }
}

/// Build the trend series for the `days` days before `today` plus today itself
pub fn trend(series: &MetricSeries, today: NaiveDate, days: u32) -> Result<TrendSeries, HeatmapError> {
    check_range("trend_days", days, MAX_TREND_DAYS)?;
    let start = today
        .checked_sub_days(Days::new(u64::from(days)))
        .ok_or_else(|| HeatmapError::DateOutOfRange(format!("{days} days before {today}")))?;
    let dates: Vec<NaiveDate> = start.iter_days().take(days as usize + 1).collect();

    let datasets = MetricKind::ALL
        .into_iter()
        .map(|metric| {
            let (label, scale) = chart_scale(metric);
            TrendDataset {
                metric,
                label,
                scale,
                values: dates
                    .iter()
                    .map(|date| series.value(*date, metric).map(|value| value * scale))
                    .collect(),
            }
        })
        .collect();

    Ok(TrendSeries { dates, datasets })
}
