//! Error types for the heatmap engine

use thiserror::Error;

/// Errors that can occur at the boundaries of the engine.
///
/// The grid, classifier and aggregator never fail on missing or out-of-domain
/// data; these variants cover parsing input and date arithmetic overflow.
#[derive(Debug, Error)]
pub enum HeatmapError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}
