//! Intensity classification
//!
//! Maps a raw metric value onto the metric's ordinal display level using the
//! tables in [`crate::metric`]. Missing and out-of-domain values classify as
//! level 0 instead of failing.

use crate::metric::Scale;
use crate::types::{IntensityLevel, LegendEntry, MetricKind};

/// Classify a raw value into an intensity level for `metric`.
///
/// Banded metrics are checked from the highest band downward and the first
/// band the value reaches wins. Ordinal metrics pass integral in-range values
/// through unchanged.
pub fn classify(value: Option<f64>, metric: MetricKind) -> IntensityLevel {
    let Some(value) = value else {
        return 0;
    };

    match metric.profile().scale {
        Scale::Banded(bands) => bands
            .iter()
            .enumerate()
            .rev()
            .find(|(_, band)| band.admits(value))
            .map(|(index, _)| (index + 1) as IntensityLevel)
            .unwrap_or(0),
        Scale::Ordinal { min, max } => {
            if value.fract() == 0.0 && value >= f64::from(min) && value <= f64::from(max) {
                value as IntensityLevel
            } else {
                0
            }
        }
    }
}

/// Legend swatches for `metric`, one per level from 0 to the metric's maximum
pub fn legend(metric: MetricKind) -> Vec<LegendEntry> {
    let profile = metric.profile();
    profile
        .legend_labels
        .iter()
        .zip(profile.palette.iter())
        .enumerate()
        .map(|(level, (&range_label, &color))| LegendEntry {
            level: level as IntensityLevel,
            range_label,
            color,
        })
        .collect()
}

/// Legend label for a level, `None` past the metric's maximum
pub fn level_label(level: IntensityLevel, metric: MetricKind) -> Option<&'static str> {
    metric.profile().legend_labels.get(level as usize).copied()
}

/// Palette color for a level, `None` past the metric's maximum
pub fn level_color(level: IntensityLevel, metric: MetricKind) -> Option<&'static str> {
    metric.profile().palette.get(level as usize).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_value_is_level_zero() {
        for metric in MetricKind::ALL {
            assert_eq!(classify(None, metric), 0);
        }
    }

    #[test]
    fn test_sleep_band_boundaries() {
        assert_eq!(classify(Some(94.0), MetricKind::Sleep), 7);
        assert_eq!(classify(Some(95.0), MetricKind::Sleep), 8);
        assert_eq!(classify(Some(100.0), MetricKind::Sleep), 8);
        assert_eq!(classify(Some(49.0), MetricKind::Sleep), 0);
        assert_eq!(classify(Some(50.0), MetricKind::Sleep), 1);
        assert_eq!(classify(Some(54.9), MetricKind::Sleep), 1);
        assert_eq!(classify(Some(55.0), MetricKind::Sleep), 2);
        assert_eq!(classify(Some(74.0), MetricKind::Sleep), 3);
        assert_eq!(classify(Some(75.0), MetricKind::Sleep), 4);
    }

    #[test]
    fn test_sleep_low_gap_is_preserved() {
        // Positive sleep scores below 50 have no band.
        for value in [1.0, 10.0, 25.0, 49.99] {
            assert_eq!(classify(Some(value), MetricKind::Sleep), 0);
        }
    }

    #[test]
    fn test_steps_bands() {
        assert_eq!(classify(Some(0.0), MetricKind::Steps), 0);
        assert_eq!(classify(Some(-500.0), MetricKind::Steps), 0);
        assert_eq!(classify(Some(1.0), MetricKind::Steps), 1);
        assert_eq!(classify(Some(1_999.0), MetricKind::Steps), 1);
        assert_eq!(classify(Some(2_000.0), MetricKind::Steps), 2);
        assert_eq!(classify(Some(3_500.0), MetricKind::Steps), 3);
        assert_eq!(classify(Some(5_000.0), MetricKind::Steps), 4);
        assert_eq!(classify(Some(7_499.0), MetricKind::Steps), 4);
        assert_eq!(classify(Some(7_500.0), MetricKind::Steps), 5);
        assert_eq!(classify(Some(10_000.0), MetricKind::Steps), 6);
        assert_eq!(classify(Some(12_500.0), MetricKind::Steps), 7);
        assert_eq!(classify(Some(15_000.0), MetricKind::Steps), 8);
        assert_eq!(classify(Some(40_000.0), MetricKind::Steps), 8);
    }

    #[test]
    fn test_activity_bands() {
        assert_eq!(classify(Some(0.0), MetricKind::Activity), 0);
        assert_eq!(classify(Some(0.5), MetricKind::Activity), 1);
        assert_eq!(classify(Some(9.0), MetricKind::Activity), 1);
        assert_eq!(classify(Some(10.0), MetricKind::Activity), 2);
        assert_eq!(classify(Some(39.0), MetricKind::Activity), 4);
        assert_eq!(classify(Some(69.0), MetricKind::Activity), 7);
        assert_eq!(classify(Some(70.0), MetricKind::Activity), 8);
    }

    #[test]
    fn test_mood_pass_through() {
        assert_eq!(classify(Some(4.0), MetricKind::Mood), 4);
        assert_eq!(classify(Some(1.0), MetricKind::Mood), 1);
        assert_eq!(classify(Some(7.0), MetricKind::Mood), 7);
        assert_eq!(classify(Some(9.0), MetricKind::Mood), 0);
        assert_eq!(classify(Some(0.0), MetricKind::Mood), 0);
        assert_eq!(classify(Some(-3.0), MetricKind::Mood), 0);
        assert_eq!(classify(Some(4.5), MetricKind::Mood), 0);
        assert_eq!(classify(None, MetricKind::Mood), 0);
    }

    #[test]
    fn test_nan_is_level_zero() {
        for metric in MetricKind::ALL {
            assert_eq!(classify(Some(f64::NAN), metric), 0);
        }
    }

    #[test]
    fn test_legend_matches_levels() {
        let sleep = legend(MetricKind::Sleep);
        assert_eq!(sleep.len(), 9);
        assert_eq!(sleep[0].range_label, "No data");
        assert_eq!(sleep[8].range_label, "95-100");
        assert_eq!(sleep[8].color, "#d2dcff");

        let mood = legend(MetricKind::Mood);
        assert_eq!(mood.len(), 8);
        assert_eq!(mood[7].range_label, "Very Pleasant");
        assert!(mood
            .iter()
            .enumerate()
            .all(|(i, entry)| entry.level as usize == i));
    }

    #[test]
    fn test_level_lookups() {
        assert_eq!(level_label(2, MetricKind::Steps), Some("2,000-3,499"));
        assert_eq!(level_label(8, MetricKind::Mood), None);
        assert_eq!(level_color(6, MetricKind::Mood), Some("#ffd600"));
    }
}
