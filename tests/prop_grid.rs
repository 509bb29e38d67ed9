use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use health_heatmap::{
    classify, DataWindow, DayRecord, GridBuilder, HeatmapConfig, HeatmapRenderer, MetricKind,
    MetricSeries, WeekStart,
};
use proptest::prelude::*;

fn arb_today() -> impl Strategy<Value = NaiveDate> {
    // 1990-01-01 through roughly 2044
    (0u64..20_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + Days::new(offset)
    })
}

fn arb_week_start() -> impl Strategy<Value = WeekStart> {
    prop_oneof![Just(WeekStart::Monday), Just(WeekStart::Sunday)]
}

fn full_record() -> DayRecord {
    DayRecord {
        sleep: Some(88.0),
        steps: Some(11_000.0),
        activity: Some(35.0),
        mood: Some(5.0),
    }
}

/// A series with data on every grid day, inside the true window or not
fn saturated_series(window: &DataWindow) -> MetricSeries {
    window.days().map(|day| (day, full_record())).collect()
}

proptest! {
    // The grid always holds exactly weeks x 7 contiguous days
    #[test]
    fn grid_has_fixed_length(today in arb_today(), week_start in arb_week_start()) {
        let window = DataWindow::new(today, 6, 26, week_start).unwrap();
        let grid = GridBuilder::build(&window, &MetricSeries::new(), MetricKind::Sleep);

        prop_assert_eq!(grid.cells.len(), 182);
        prop_assert_eq!(grid.columns, 26);
        for pair in grid.cells.windows(2) {
            prop_assert_eq!(pair[1].date, pair[0].date + Days::new(1));
        }
        prop_assert_eq!(grid.cells[0].date.weekday(), week_start.first_weekday());
        prop_assert_eq!(grid.cells[181].date.weekday(), week_start.last_weekday());
        prop_assert!(grid.cells.iter().any(|cell| cell.date == today));
    }

    // Columns advance once per week and rows follow the weekday
    #[test]
    fn cells_are_laid_out_by_week(today in arb_today(), week_start in arb_week_start()) {
        let window = DataWindow::new(today, 6, 26, week_start).unwrap();
        let grid = GridBuilder::build(&window, &MetricSeries::new(), MetricKind::Steps);

        for (index, cell) in grid.cells.iter().enumerate() {
            prop_assert_eq!(cell.column, index / 7);
            prop_assert_eq!(cell.row, index % 7);
            prop_assert_eq!(cell.row, week_start.row_of(cell.date.weekday()));
        }
    }

    // Days outside the true window are padding even when the series has data for them
    #[test]
    fn padding_cells_carry_no_data(today in arb_today(), week_start in arb_week_start()) {
        let window = DataWindow::new(today, 6, 26, week_start).unwrap();
        let true_start = today.checked_sub_months(Months::new(6)).unwrap();
        let series = saturated_series(&window);

        for metric in MetricKind::ALL {
            let grid = GridBuilder::build(&window, &series, metric);
            let mut in_window = 0usize;

            for cell in &grid.cells {
                if cell.date < true_start || cell.date > today {
                    prop_assert!(cell.is_padding);
                    prop_assert_eq!(cell.raw_value, None);
                    prop_assert_eq!(cell.level, 0);
                } else {
                    prop_assert!(!cell.is_padding);
                    prop_assert!(cell.raw_value.is_some());
                    in_window += 1;
                }
            }

            let summary = health_heatmap::aggregate(&grid.cells, metric);
            prop_assert_eq!(summary.days_with_data, in_window);
            prop_assert_eq!(summary.distribution.values().sum::<usize>(), in_window);
        }
    }

    // Month labels appear once per month, in order, inside the grid
    #[test]
    fn month_labels_are_ordered(today in arb_today(), week_start in arb_week_start()) {
        let window = DataWindow::new(today, 6, 26, week_start).unwrap();
        let grid = GridBuilder::build(&window, &MetricSeries::new(), MetricKind::Mood);

        prop_assert!(grid.month_labels.len() >= 5 && grid.month_labels.len() <= 7);
        for pair in grid.month_labels.windows(2) {
            prop_assert!(pair[0].column < pair[1].column);
            prop_assert_ne!(pair[0].month, pair[1].month);
        }
        for label in &grid.month_labels {
            prop_assert!(label.column <= grid.columns);
        }
    }

    // Larger values never fall into a lower band
    #[test]
    fn classification_is_monotonic(a in 0.0f64..20_000.0, b in 0.0f64..20_000.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        for metric in [MetricKind::Sleep, MetricKind::Steps, MetricKind::Activity] {
            prop_assert!(classify(Some(low), metric) <= classify(Some(high), metric));
        }
    }

    // Whole mood scores pass through, everything else is no data
    #[test]
    fn mood_passes_through(score in -20i32..20) {
        let level = classify(Some(f64::from(score)), MetricKind::Mood);
        if (1..=7).contains(&score) {
            prop_assert_eq!(i32::from(level), score);
        } else {
            prop_assert_eq!(level, 0);
        }
    }

    // Rendering the same inputs twice gives identical bytes
    #[test]
    fn render_is_idempotent(today in arb_today(), seed in any::<u64>()) {
        let series = health_heatmap::synthetic::generate(today, 6, seed).unwrap();
        let renderer = HeatmapRenderer::with_config(HeatmapConfig::default()).unwrap();

        let first = serde_json::to_string(&renderer.render_all(&series, today).unwrap()).unwrap();
        let second = serde_json::to_string(&renderer.render_all(&series, today).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn week_start_on_today_adds_no_shift() {
    // 2024-03-11 is a Monday, 2024-03-10 a Sunday
    let monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
    assert_eq!(monday.weekday(), Weekday::Mon);
    let window = DataWindow::new(monday, 6, 26, WeekStart::Monday).unwrap();
    assert_eq!(window.padded_end, monday + Days::new(6));
    assert_eq!(window.padded_start, monday - Days::new(25 * 7));

    let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let window = DataWindow::new(sunday, 6, 26, WeekStart::Sunday).unwrap();
    assert_eq!(window.padded_end, sunday + Days::new(6));
    assert_eq!(window.padded_start, sunday - Days::new(25 * 7));
}
