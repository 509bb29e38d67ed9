//! Health Heatmap - Calendar heatmap engine for daily health metrics
//!
//! Turns a date-keyed series of daily sleep, steps, activity and mood values
//! into render-ready heatmap data through a one-way pipeline:
//! data window → week-aligned grid → intensity classification → aggregation.
//!
//! ## Modules
//!
//! - **Grid**: Week-column calendar layout with month and weekday labels
//! - **Classification**: Per-metric threshold tables mapping values to levels
//! - **Aggregation**: Averages and level distributions over the true window
//! - **Trend**: Rescaled multi-metric series for the recent-days line chart

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod error;
pub mod grid;
pub mod metric;
pub mod pipeline;
pub mod series;
pub mod synthetic;
pub mod trend;
pub mod types;
pub mod window;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use aggregator::{aggregate, distribution_percentages};
pub use classifier::{classify, legend};
pub use config::HeatmapConfig;
pub use error::HeatmapError;
pub use grid::GridBuilder;
pub use pipeline::{render_all_heatmaps, render_heatmap, HeatmapRenderer};
pub use types::{
    AggregateSummary, DayCell, DayRecord, GridDescriptor, HeatmapPayload, IntensityLevel,
    MetricKind, MetricSeries,
};
pub use window::{DataWindow, WeekStart};

/// Engine version reported by the CLI and the C ABI
pub const HEATMAP_VERSION: &str = env!("CARGO_PKG_VERSION");
