//! Aggregation over grid cells
//!
//! Averages and level distributions are computed from the same cells the
//! grid draws, so the numbers shown beside a heatmap always match its squares.
//! Padding cells never count.

use std::collections::BTreeMap;

use tracing::debug;

use crate::classifier::{level_color, level_label};
use crate::types::{AggregateSummary, DayCell, DistributionSlice, MetricKind, MetricSeries};

/// Fold the non-padding cells of a grid into an [`AggregateSummary`].
///
/// The average is the unrounded mean of raw values over the days that have
/// one. The distribution lists every level of `metric`, including empty ones.
pub fn aggregate(cells: &[DayCell], metric: MetricKind) -> AggregateSummary {
    let mut distribution: BTreeMap<_, usize> = (0..=metric.max_level()).map(|l| (l, 0)).collect();
    let mut sum = 0.0;
    let mut days_with_data = 0usize;

    for cell in cells.iter().filter(|cell| !cell.is_padding) {
        let Some(value) = cell.raw_value else {
            continue;
        };
        sum += value;
        days_with_data += 1;
        *distribution.entry(cell.level).or_insert(0) += 1;
    }

    let average = (days_with_data > 0).then(|| sum / days_with_data as f64);
    debug!(metric = %metric, days_with_data, ?average, "aggregated heatmap cells");

    AggregateSummary {
        average,
        days_with_data,
        distribution,
    }
}

/// Share of each populated level, as drawn in the distribution chart.
///
/// Counts come from the non-padding cells; the denominator is the total
/// number of dates in `series`, not the number of days with data in the
/// window. An empty series yields no slices.
pub fn distribution_percentages(
    cells: &[DayCell],
    metric: MetricKind,
    series: &MetricSeries,
) -> Vec<DistributionSlice> {
    slices_from_summary(&aggregate(cells, metric), metric, series.len())
}

/// Distribution slices for an already computed summary
pub fn slices_from_summary(
    summary: &AggregateSummary,
    metric: MetricKind,
    total_days_in_series: usize,
) -> Vec<DistributionSlice> {
    if total_days_in_series == 0 {
        return Vec::new();
    }

    summary
        .distribution
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(&level, &count)| DistributionSlice {
            level,
            range_label: level_label(level, metric).unwrap_or_default(),
            color: level_color(level, metric).unwrap_or_default(),
            count,
            percentage: count as f64 / total_days_in_series as f64 * 100.0,
        })
        .collect()
}
