//! Render configuration
//!
//! The defaults reproduce the dashboard layout: six months of data shown in a
//! 26-week, Monday-first grid, with a 30-day trend chart.

use serde::{Deserialize, Serialize};

use crate::error::HeatmapError;
use crate::window::WeekStart;

/// Default lookback of the true data window, in calendar months
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 6;

/// Default number of week columns in the grid
pub const DEFAULT_WEEKS: u32 = 26;

/// Default length of the trend chart, in days before today
pub const DEFAULT_TREND_DAYS: u32 = 30;

/// Largest accepted lookback, in calendar months
pub const MAX_LOOKBACK_MONTHS: u32 = 120;

/// Largest accepted grid, about two years of week columns
pub const MAX_WEEKS: u32 = 106;

/// Largest accepted trend chart, one leap year of days
pub const MAX_TREND_DAYS: u32 = 366;

/// Settings shared by every render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub lookback_months: u32,
    pub weeks: u32,
    pub week_start: WeekStart,
    pub trend_days: u32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
            weeks: DEFAULT_WEEKS,
            week_start: WeekStart::default(),
            trend_days: DEFAULT_TREND_DAYS,
        }
    }
}

impl HeatmapConfig {
    /// Load a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, HeatmapError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, HeatmapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), HeatmapError> {
        check_range("lookback_months", self.lookback_months, MAX_LOOKBACK_MONTHS)?;
        check_range("weeks", self.weeks, MAX_WEEKS)?;
        check_range("trend_days", self.trend_days, MAX_TREND_DAYS)?;
        Ok(())
    }
}

/// Reject `value` outside `1..=max`
pub(crate) fn check_range(name: &str, value: u32, max: u32) -> Result<(), HeatmapError> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(HeatmapError::InvalidConfig(format!(
            "{name} must be between 1 and {max}, got {value}"
        )))
    }
}
