//! Synthetic fallback data
//!
//! Used when no real series is available. Every day of the true window gets
//! a full record drawn uniformly from a plausible range per metric. Output is
//! reproducible for a given seed.

use chrono::{Days, Months, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::{check_range, MAX_LOOKBACK_MONTHS};
use crate::error::HeatmapError;
use crate::types::{DayRecord, MetricSeries};

/// Generate one record per day from `today - lookback_months` through `today`
pub fn generate(
    today: NaiveDate,
    lookback_months: u32,
    seed: u64,
) -> Result<MetricSeries, HeatmapError> {
    check_range("lookback_months", lookback_months, MAX_LOOKBACK_MONTHS)?;
    let start = today
        .checked_sub_months(Months::new(lookback_months))
        .ok_or_else(|| {
            HeatmapError::DateOutOfRange(format!("{today} minus {lookback_months} months"))
        })?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut series = MetricSeries::new();
    let mut date = start;

    while date <= today {
        series.insert(
            date,
            DayRecord {
                sleep: Some(f64::from(rng.gen_range(50u32..100))),
                steps: Some(f64::from(rng.gen_range(2_000u32..17_000))),
                activity: Some(f64::from(rng.gen_range(10u32..80))),
                mood: Some(f64::from(rng.gen_range(1u32..8))),
            },
        );
        date = match date.checked_add_days(Days::new(1)) {
            Some(next) => next,
            None => break,
        };
    }

    debug!(days = series.len(), seed, %start, %today, "generated synthetic series");
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetricKind;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_covers_true_window() {
        let series = generate(date("2024-03-13"), 6, 7).unwrap();

        assert_eq!(series.first_date(), Some(date("2023-09-13")));
        assert_eq!(series.last_date(), Some(date("2024-03-13")));
        assert_eq!(series.len(), 183);
    }

    #[test]
    fn test_values_in_range() {
        let series = generate(date("2024-03-13"), 6, 42).unwrap();

        for (_, record) in series.iter() {
            let sleep = record.value(MetricKind::Sleep).unwrap();
            let steps = record.value(MetricKind::Steps).unwrap();
            let activity = record.value(MetricKind::Activity).unwrap();
            let mood = record.value(MetricKind::Mood).unwrap();

            assert!((50.0..100.0).contains(&sleep));
            assert!((2_000.0..17_000.0).contains(&steps));
            assert!((10.0..80.0).contains(&activity));
            assert!((1.0..=7.0).contains(&mood));
        }
    }

    #[test]
    fn test_rejects_unbounded_lookback() {
        assert!(matches!(
            generate(date("2024-03-13"), 1_000_000, 1),
            Err(HeatmapError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = generate(date("2024-03-13"), 6, 99).unwrap();
        let b = generate(date("2024-03-13"), 6, 99).unwrap();
        assert_eq!(a, b);
    }
}
