//! Render orchestration
//!
//! This module provides the public entry points. A render runs in one
//! direction: window → grid (classifying each day) → aggregate → payload.
//! Nothing is cached between renders; every call recomputes from its inputs.

use chrono::NaiveDate;
use tracing::debug;

use crate::aggregator::{aggregate, slices_from_summary};
use crate::classifier::legend;
use crate::config::HeatmapConfig;
use crate::error::HeatmapError;
use crate::grid::GridBuilder;
use crate::metric::format_average;
use crate::series::parse_date;
use crate::trend::{trend, TrendSeries};
use crate::types::{HeatmapPayload, MetricKind, MetricSeries};
use crate::window::DataWindow;

/// Render one metric from fixture JSON to payload JSON with the default
/// configuration.
///
/// # Arguments
/// * `series_json` - Series keyed by `YYYY-MM-DD`
/// * `metric` - `sleep`, `steps`, `activity` or `mood`
/// * `today` - Last day of the window, `YYYY-MM-DD`
///
/// # Example
/// ```ignore
/// let payload = render_heatmap(
///     r#"{"2024-03-12": {"sleep": 88}}"#.to_string(),
///     "sleep".to_string(),
///     "2024-03-13".to_string(),
/// )?;
/// ```
pub fn render_heatmap(
    series_json: String,
    metric: String,
    today: String,
) -> Result<String, HeatmapError> {
    HeatmapRenderer::new().render_json(&series_json, &metric, &today)
}

/// Render every metric from fixture JSON to a JSON array of payloads
pub fn render_all_heatmaps(series_json: String, today: String) -> Result<String, HeatmapError> {
    let renderer = HeatmapRenderer::new();
    let series = MetricSeries::from_json(&series_json)?;
    let payloads = renderer.render_all(&series, parse_date(&today)?)?;
    Ok(serde_json::to_string(&payloads)?)
}

/// Renderer holding the layout configuration shared by all renders
#[derive(Debug, Clone, Default)]
pub struct HeatmapRenderer {
    config: HeatmapConfig,
}

impl HeatmapRenderer {
    /// Create a renderer with the default six-month, 26-week layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with a validated configuration
    pub fn with_config(config: HeatmapConfig) -> Result<Self, HeatmapError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Replace the configuration from JSON
    pub fn load_config(&mut self, json: &str) -> Result<(), HeatmapError> {
        self.config = HeatmapConfig::from_json(json)?;
        Ok(())
    }

    pub fn save_config(&self) -> Result<String, HeatmapError> {
        self.config.to_json()
    }

    /// Render the heatmap payload for one metric
    pub fn render(
        &self,
        series: &MetricSeries,
        metric: MetricKind,
        today: NaiveDate,
    ) -> Result<HeatmapPayload, HeatmapError> {
        let window = DataWindow::from_config(today, &self.config)?;
        debug!(
            metric = %metric,
            %today,
            week_start = %window.week_start,
            true_start = %window.true_start,
            padded_start = %window.padded_start,
            padded_end = %window.padded_end,
            "rendering heatmap"
        );

        let grid = GridBuilder::build(&window, series, metric);
        let summary = aggregate(&grid.cells, metric);
        let distribution = slices_from_summary(&summary, metric, series.len());
        let average_label = format_average(&summary, metric);

        Ok(HeatmapPayload {
            metric,
            display_name: metric.display_name(),
            window,
            grid,
            legend: legend(metric),
            summary,
            average_label,
            distribution,
        })
    }

    /// Render every metric, in dashboard order
    pub fn render_all(
        &self,
        series: &MetricSeries,
        today: NaiveDate,
    ) -> Result<Vec<HeatmapPayload>, HeatmapError> {
        MetricKind::ALL
            .into_iter()
            .map(|metric| self.render(series, metric, today))
            .collect()
    }

    /// Trend chart data ending at `today`
    pub fn trend(&self, series: &MetricSeries, today: NaiveDate) -> Result<TrendSeries, HeatmapError> {
        trend(series, today, self.config.trend_days)
    }

    /// Render one metric from string inputs to payload JSON
    pub fn render_json(
        &self,
        series_json: &str,
        metric: &str,
        today: &str,
    ) -> Result<String, HeatmapError> {
        let metric: MetricKind = metric.parse()?;
        let today = parse_date(today)?;
        let series = MetricSeries::from_json(series_json)?;
        let payload = self.render(&series, metric, today)?;
        Ok(serde_json::to_string(&payload)?)
    }
}
