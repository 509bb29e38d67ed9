//! Heatmap CLI - Command-line interface for the health heatmap engine
//!
//! Commands:
//! - render: Full heatmap payloads (grid, legend, summary, distribution)
//! - summary: Averages and distributions only
//! - legend: Level legend for one or all metrics
//! - trend: Rescaled recent-days series for the line chart
//! - generate: Seeded synthetic series in the fixture format

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use health_heatmap::series::parse_date;
use health_heatmap::types::{DistributionSlice, LegendEntry};
use health_heatmap::{
    legend, synthetic, HeatmapConfig, HeatmapError, HeatmapRenderer, MetricKind, MetricSeries,
    WeekStart, HEATMAP_VERSION,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Heatmap - Calendar heatmaps for daily health metrics
#[derive(Parser)]
#[command(name = "heatmap")]
#[command(version = HEATMAP_VERSION)]
#[command(about = "Render calendar heatmap data for sleep, steps, activity and mood", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads a series
#[derive(clap::Args)]
struct SeriesArgs {
    /// Series file keyed by date (use - for stdin); synthetic data when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Last day of the window (YYYY-MM-DD), defaults to the local date
    #[arg(long)]
    today: Option<String>,

    /// Configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured week start (monday or sunday)
    #[arg(long)]
    week_start: Option<String>,

    /// Seed for synthetic data when no input is given
    #[arg(long, default_value = "0")]
    seed: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Render full heatmap payloads
    Render {
        #[command(flatten)]
        series: SeriesArgs,

        /// Metric to render (all metrics when omitted)
        #[arg(short, long)]
        metric: Option<String>,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,
    },

    /// Print averages and level distributions
    Summary {
        #[command(flatten)]
        series: SeriesArgs,

        /// Metric to summarize (all metrics when omitted)
        #[arg(short, long)]
        metric: Option<String>,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,
    },

    /// Print the level legend
    Legend {
        /// Metric whose legend to print (all metrics when omitted)
        #[arg(short, long)]
        metric: Option<String>,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,
    },

    /// Print the recent-days trend series
    Trend {
        #[command(flatten)]
        series: SeriesArgs,

        /// Days before today to include (overrides the configuration)
        #[arg(long)]
        days: Option<u32>,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Generate a synthetic series
    Generate {
        /// Last generated day (YYYY-MM-DD), defaults to the local date
        #[arg(long)]
        today: Option<String>,

        /// Months of data to generate
        #[arg(long, default_value = "6")]
        months: u32,

        /// Random seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array of records
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so stdout stays machine-readable
fn init_tracing() {
    let filter = EnvFilter::try_from_env("HEATMAP_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .compact()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> Result<(), HeatmapCliError> {
    match cli.command {
        Commands::Render {
            series,
            metric,
            output_format,
        } => cmd_render(&series, metric.as_deref(), &output_format),

        Commands::Summary {
            series,
            metric,
            output_format,
        } => cmd_summary(&series, metric.as_deref(), &output_format),

        Commands::Legend {
            metric,
            output_format,
        } => cmd_legend(metric.as_deref(), &output_format),

        Commands::Trend {
            series,
            days,
            output_format,
        } => cmd_trend(&series, days, &output_format),

        Commands::Generate {
            today,
            months,
            seed,
            output,
        } => cmd_generate(today.as_deref(), months, seed, &output),
    }
}

fn cmd_render(
    args: &SeriesArgs,
    metric: Option<&str>,
    output_format: &OutputFormat,
) -> Result<(), HeatmapCliError> {
    let (renderer, series, today) = load_inputs(args)?;

    let mut payloads = Vec::new();
    for metric in selected_metrics(metric)? {
        payloads.push(renderer.render(&series, metric, today)?);
    }

    print!("{}", format_output(&payloads, output_format)?);
    Ok(())
}

fn cmd_summary(
    args: &SeriesArgs,
    metric: Option<&str>,
    output_format: &OutputFormat,
) -> Result<(), HeatmapCliError> {
    let (renderer, series, today) = load_inputs(args)?;

    let mut reports = Vec::new();
    for metric in selected_metrics(metric)? {
        let payload = renderer.render(&series, metric, today)?;
        reports.push(SummaryReport {
            metric,
            display_name: payload.display_name,
            average: payload.summary.average,
            average_label: payload.average_label,
            days_with_data: payload.summary.days_with_data,
            distribution: payload.distribution,
        });
    }

    print!("{}", format_output(&reports, output_format)?);
    Ok(())
}

fn cmd_legend(metric: Option<&str>, output_format: &OutputFormat) -> Result<(), HeatmapCliError> {
    let legends: Vec<LegendReport> = selected_metrics(metric)?
        .into_iter()
        .map(|metric| LegendReport {
            metric,
            display_name: metric.display_name(),
            entries: legend(metric),
        })
        .collect();

    print!("{}", format_output(&legends, output_format)?);
    Ok(())
}

fn cmd_trend(
    args: &SeriesArgs,
    days: Option<u32>,
    output_format: &OutputFormat,
) -> Result<(), HeatmapCliError> {
    let (renderer, series, today) = load_inputs(args)?;

    let renderer = match days {
        Some(trend_days) => HeatmapRenderer::with_config(HeatmapConfig {
            trend_days,
            ..*renderer.config()
        })?,
        None => renderer,
    };
    let trend = renderer.trend(&series, today)?;

    print!("{}", format_output(&[trend], output_format)?);
    Ok(())
}

fn cmd_generate(
    today: Option<&str>,
    months: u32,
    seed: u64,
    output: &Path,
) -> Result<(), HeatmapCliError> {
    let today = resolve_today(today)?;
    let series = synthetic::generate(today, months, seed)?;
    let json = serde_json::to_string_pretty(&series)?;

    if output.to_string_lossy() == "-" {
        println!("{}", json);
    } else {
        fs::write(output, json)?;
        info!(path = %output.display(), days = series.len(), "wrote synthetic series");
    }

    Ok(())
}

// Helper functions

fn load_inputs(args: &SeriesArgs) -> Result<(HeatmapRenderer, MetricSeries, NaiveDate), HeatmapCliError> {
    let mut config = match &args.config {
        Some(path) => HeatmapConfig::from_json(&fs::read_to_string(path)?)?,
        None => HeatmapConfig::default(),
    };
    if let Some(week_start) = &args.week_start {
        config.week_start = week_start.parse::<WeekStart>()?;
    }
    let renderer = HeatmapRenderer::with_config(config)?;

    let today = resolve_today(args.today.as_deref())?;

    let series = match &args.input {
        Some(input) => MetricSeries::from_json(&read_input(input)?)?,
        None => {
            debug!(seed = args.seed, "no input given, using synthetic series");
            synthetic::generate(today, config.lookback_months, args.seed)?
        }
    };

    Ok((renderer, series, today))
}

fn read_input(input: &Path) -> Result<String, HeatmapCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn resolve_today(today: Option<&str>) -> Result<NaiveDate, HeatmapCliError> {
    match today {
        Some(today) => Ok(parse_date(today)?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

fn selected_metrics(metric: Option<&str>) -> Result<Vec<MetricKind>, HeatmapCliError> {
    match metric {
        Some(metric) => Ok(vec![metric.parse()?]),
        None => Ok(MetricKind::ALL.to_vec()),
    }
}

fn format_output<T: Serialize>(records: &[T], format: &OutputFormat) -> Result<String, HeatmapCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for record in records {
                lines.push(serde_json::to_string(record)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(records)? + "\n"),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(records)? + "\n"),
    }
}

// Report types

#[derive(Serialize)]
struct SummaryReport {
    metric: MetricKind,
    display_name: &'static str,
    average: Option<f64>,
    average_label: Option<String>,
    days_with_data: usize,
    distribution: Vec<DistributionSlice>,
}

#[derive(Serialize)]
struct LegendReport {
    metric: MetricKind,
    display_name: &'static str,
    entries: Vec<LegendEntry>,
}

// Error types

#[derive(Debug)]
enum HeatmapCliError {
    Io(io::Error),
    Heatmap(HeatmapError),
    Json(serde_json::Error),
}

impl From<io::Error> for HeatmapCliError {
    fn from(e: io::Error) -> Self {
        HeatmapCliError::Io(e)
    }
}

impl From<HeatmapError> for HeatmapCliError {
    fn from(e: HeatmapError) -> Self {
        HeatmapCliError::Heatmap(e)
    }
}

impl From<serde_json::Error> for HeatmapCliError {
    fn from(e: serde_json::Error) -> Self {
        HeatmapCliError::Json(e)
    }
}

#[derive(Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<HeatmapCliError> for CliError {
    fn from(e: HeatmapCliError) -> Self {
        match e {
            HeatmapCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            HeatmapCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            HeatmapCliError::Heatmap(e) => {
                let (code, hint) = match &e {
                    HeatmapError::JsonError(_) => ("JSON_ERROR", "Check JSON syntax"),
                    HeatmapError::DateParseError(_) => (
                        "DATE_ERROR",
                        "Dates must be YYYY-MM-DD and series must be an object keyed by date",
                    ),
                    HeatmapError::UnknownMetric(_) => {
                        ("UNKNOWN_METRIC", "Use one of: sleep, steps, activity, mood")
                    }
                    HeatmapError::InvalidConfig(_) => (
                        "CONFIG_ERROR",
                        "lookback_months (1-120), weeks (1-106) and trend_days (1-366) must be in range; week_start is monday or sunday",
                    ),
                    HeatmapError::DateOutOfRange(_) => {
                        ("DATE_OUT_OF_RANGE", "Use a date closer to the present")
                    }
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
        }
    }
}
