//! Date windows
//!
//! A render covers two spans of days:
//! - the *true* window, `today - lookback_months ..= today`, where data is expected
//! - the *padded* window, whole weeks under the active week-start convention,
//!   ending with the week that contains `today`
//!
//! Days of the padded window outside the true window become padding cells.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{check_range, HeatmapConfig, MAX_LOOKBACK_MONTHS, MAX_WEEKS};
use crate::error::HeatmapError;

/// First weekday of each grid column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn first_weekday(&self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }

    /// Weekday drawn in the bottom row of a column
    pub fn last_weekday(&self) -> Weekday {
        self.first_weekday().pred()
    }

    /// Row of `weekday` within a column (0 = first weekday)
    pub fn row_of(&self, weekday: Weekday) -> usize {
        let first = self.first_weekday().num_days_from_monday();
        ((weekday.num_days_from_monday() + 7 - first) % 7) as usize
    }

    /// Weekdays in row order
    pub fn weekdays(&self) -> [Weekday; 7] {
        let mut days = [self.first_weekday(); 7];
        for i in 1..7 {
            days[i] = days[i - 1].succ();
        }
        days
    }

    /// First day of the week containing `date`
    pub fn week_containing(&self, date: NaiveDate) -> Result<NaiveDate, HeatmapError> {
        let offset = self.row_of(date.weekday()) as u64;
        date.checked_sub_days(Days::new(offset))
            .ok_or_else(|| HeatmapError::DateOutOfRange(format!("week start of {date}")))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeekStart::Monday => "monday",
            WeekStart::Sunday => "sunday",
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekStart {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStart::Monday),
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            other => Err(HeatmapError::InvalidConfig(format!(
                "unsupported week start: {other}"
            ))),
        }
    }
}

/// True and padded date ranges for one render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataWindow {
    pub today: NaiveDate,
    /// First day of the true window
    pub true_start: NaiveDate,
    /// First cell of the grid, always on the week-start weekday
    pub padded_start: NaiveDate,
    /// Last cell of the grid, the final day of the week containing `today`
    pub padded_end: NaiveDate,
    pub week_start: WeekStart,
    pub weeks: u32,
}

impl DataWindow {
    /// Compute the window ending at `today`.
    ///
    /// The lookback subtracts calendar months and clamps to the end of the
    /// target month, so Aug 31 looks back to the last day of February.
    pub fn new(
        today: NaiveDate,
        lookback_months: u32,
        weeks: u32,
        week_start: WeekStart,
    ) -> Result<Self, HeatmapError> {
        check_range("lookback_months", lookback_months, MAX_LOOKBACK_MONTHS)?;
        check_range("weeks", weeks, MAX_WEEKS)?;

        let true_start = today
            .checked_sub_months(Months::new(lookback_months))
            .ok_or_else(|| {
                HeatmapError::DateOutOfRange(format!("{today} minus {lookback_months} months"))
            })?;

        let current_week = week_start.week_containing(today)?;
        let padded_start = current_week
            .checked_sub_days(Days::new(u64::from(weeks - 1) * 7))
            .ok_or_else(|| HeatmapError::DateOutOfRange(format!("{weeks} weeks before {today}")))?;
        let padded_end = current_week
            .checked_add_days(Days::new(6))
            .ok_or_else(|| HeatmapError::DateOutOfRange(format!("end of week of {today}")))?;

        Ok(Self {
            today,
            true_start,
            padded_start,
            padded_end,
            week_start,
            weeks,
        })
    }

    pub fn from_config(today: NaiveDate, config: &HeatmapConfig) -> Result<Self, HeatmapError> {
        Self::new(today, config.lookback_months, config.weeks, config.week_start)
    }

    /// Whether `date` lies in the true window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.true_start && date <= self.today
    }

    /// Whether `date` is a grid cell outside the true window
    pub fn is_padding(&self, date: NaiveDate) -> bool {
        date >= self.padded_start && date <= self.padded_end && !self.contains(date)
    }

    /// Number of cells in the grid
    pub fn len_days(&self) -> usize {
        self.weeks as usize * 7
    }

    /// Grid days in chronological order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.padded_start.iter_days().take(self.len_days())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_row_order() {
        assert_eq!(WeekStart::Monday.row_of(Weekday::Mon), 0);
        assert_eq!(WeekStart::Monday.row_of(Weekday::Sun), 6);
        assert_eq!(WeekStart::Sunday.row_of(Weekday::Sun), 0);
        assert_eq!(WeekStart::Sunday.row_of(Weekday::Sat), 6);
        assert_eq!(WeekStart::Monday.last_weekday(), Weekday::Sun);
        assert_eq!(WeekStart::Sunday.last_weekday(), Weekday::Sat);
        assert_eq!(WeekStart::Sunday.weekdays()[1], Weekday::Mon);
    }

    #[test]
    fn test_monday_window_midweek() {
        // 2024-03-13 is a Wednesday
        let window = DataWindow::new(date("2024-03-13"), 6, 26, WeekStart::Monday).unwrap();

        assert_eq!(window.true_start, date("2023-09-13"));
        assert_eq!(window.padded_start, date("2023-09-18"));
        assert_eq!(window.padded_end, date("2024-03-17"));
        assert_eq!(window.padded_start.weekday(), Weekday::Mon);
        assert_eq!(window.padded_end.weekday(), Weekday::Sun);
        assert_eq!(window.days().count(), 182);
        assert_eq!(window.days().last(), Some(window.padded_end));
    }

    #[test]
    fn test_sunday_window_midweek() {
        let window = DataWindow::new(date("2024-03-13"), 6, 26, WeekStart::Sunday).unwrap();

        assert_eq!(window.padded_start, date("2023-09-17"));
        assert_eq!(window.padded_end, date("2024-03-16"));
        assert_eq!(window.padded_start.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_today_on_week_start_has_no_extra_shift() {
        // 2026-10-19 is a Monday
        let window = DataWindow::new(date("2026-10-19"), 6, 26, WeekStart::Monday).unwrap();

        assert_eq!(window.padded_start, date("2026-04-27"));
        assert_eq!(window.padded_end, date("2026-10-25"));
        assert_eq!(window.days().count(), 182);
    }

    #[test]
    fn test_lookback_clamps_to_month_end() {
        let window = DataWindow::new(date("2024-08-31"), 6, 26, WeekStart::Monday).unwrap();
        assert_eq!(window.true_start, date("2024-02-29"));

        let window = DataWindow::new(date("2025-08-31"), 6, 26, WeekStart::Monday).unwrap();
        assert_eq!(window.true_start, date("2025-02-28"));
    }

    #[test]
    fn test_padding_membership() {
        let window = DataWindow::new(date("2024-03-13"), 6, 26, WeekStart::Monday).unwrap();

        assert!(!window.is_padding(date("2024-03-13")));
        assert!(window.is_padding(date("2024-03-14")));
        assert!(window.is_padding(date("2024-03-17")));
        assert!(!window.is_padding(date("2024-03-18")));
        assert!(window.contains(date("2023-09-13")));
        assert!(!window.contains(date("2023-09-12")));
    }

    #[test]
    fn test_leading_padding_with_wide_grid() {
        let window = DataWindow::new(date("2024-03-13"), 6, 30, WeekStart::Monday).unwrap();

        assert_eq!(window.padded_start, date("2023-08-21"));
        assert!(window.is_padding(date("2023-08-21")));
        assert!(window.is_padding(date("2023-09-12")));
        assert!(!window.is_padding(date("2023-09-13")));
    }

    #[test]
    fn test_zero_weeks_rejected() {
        let result = DataWindow::new(date("2024-03-13"), 6, 0, WeekStart::Monday);
        assert!(matches!(result, Err(HeatmapError::InvalidConfig(_))));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let result = DataWindow::new(date("2024-03-13"), 6, 10_000_000, WeekStart::Monday);
        assert!(matches!(result, Err(HeatmapError::InvalidConfig(_))));
        assert!(DataWindow::new(date("2024-03-13"), 6, MAX_WEEKS, WeekStart::Monday).is_ok());
    }

    #[test]
    fn test_week_start_parse() {
        assert_eq!("Sunday".parse::<WeekStart>().unwrap(), WeekStart::Sunday);
        assert_eq!("mon".parse::<WeekStart>().unwrap(), WeekStart::Monday);
        assert!("friday".parse::<WeekStart>().is_err());
        assert_eq!(WeekStart::Sunday.to_string(), "sunday");
    }
}
