//! Loading metric series from JSON fixtures
//!
//! The fixture format is one object keyed by ISO date:
//!
//! ```json
//! { "2024-01-15": { "sleep": 82, "steps": 9400, "activity": 35, "mood": 5 } }
//! ```
//!
//! Bad entries are skipped rather than failing the whole load: a date key that
//! is unparseable or not zero-padded drops that day, a non-numeric field reads
//! as absent.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::HeatmapError;
use crate::types::{DayRecord, MetricKind, MetricSeries};

/// Date format used for series keys
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(s: &str) -> Result<NaiveDate, HeatmapError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|e| HeatmapError::DateParseError(format!("{s}: {e}")))
}

/// Render a date as `YYYY-MM-DD` from its calendar fields
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

impl MetricSeries {
    /// Parse a series from the fixture JSON format.
    ///
    /// Only a document that is not JSON, or not an object at the top level,
    /// is an error.
    pub fn from_json(json: &str) -> Result<Self, HeatmapError> {
        let value: Value = serde_json::from_str(json)?;
        let Value::Object(days) = value else {
            return Err(HeatmapError::DateParseError(
                "series must be an object keyed by date".to_string(),
            ));
        };
        Ok(Self::from_object(&days))
    }

    fn from_object(days: &Map<String, Value>) -> Self {
        let mut series = MetricSeries::new();

        for (key, entry) in days {
            let date = match parse_date(key) {
                Ok(date) => date,
                Err(e) => {
                    warn!(error = %e, "skipping series entry with malformed date key");
                    continue;
                }
            };
            // "2024-1-5" parses to the same day as "2024-01-05"
            if format_date(date) != *key {
                warn!(%key, %date, "skipping series entry with non-canonical date key");
                continue;
            }

            let mut record = DayRecord::default();
            if let Value::Object(fields) = entry {
                for metric in MetricKind::ALL {
                    record.set(metric, fields.get(metric.as_str()).and_then(Value::as_f64));
                }
            } else {
                warn!(%date, "series entry is not an object, treating as no data");
            }
            series.insert(date, record);
        }

        series
    }

    pub fn to_json(&self) -> Result<String, HeatmapError> {
        Ok(serde_json::to_string(self)?)
    }
}
