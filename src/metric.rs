//! Per-metric profile tables
//!
//! Each [`MetricKind`] owns one [`MetricProfile`] bundling its band table,
//! legend labels, palette and display name. The three tables are
//! index-aligned: band `n` of the scale is legend label `n + 1` and palette
//! color `n + 1`, with index 0 reserved for "no data".

use crate::types::{AggregateSummary, IntensityLevel, MetricKind};

/// Lower bound of one intensity band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    /// Whether a value equal to `min` falls into the band
    pub inclusive: bool,
}

impl Band {
    const fn at_least(min: f64) -> Self {
        Self {
            min,
            inclusive: true,
        }
    }

    const fn above(min: f64) -> Self {
        Self {
            min,
            inclusive: false,
        }
    }

    pub fn admits(&self, value: f64) -> bool {
        if self.inclusive {
            value >= self.min
        } else {
            value > self.min
        }
    }
}

/// How raw values map onto levels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    /// Ascending band lower bounds; band `i` is level `i + 1`
    Banded(&'static [Band]),
    /// Integral values in `min..=max` are used as the level directly
    Ordinal { min: u8, max: u8 },
}

/// Display and classification tables for one metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricProfile {
    pub kind: MetricKind,
    pub display_name: &'static str,
    pub scale: Scale,
    pub legend_labels: &'static [&'static str],
    pub palette: &'static [&'static str],
}

impl MetricProfile {
    /// Highest level this metric can produce
    pub fn max_level(&self) -> IntensityLevel {
        match self.scale {
            Scale::Banded(bands) => bands.len() as IntensityLevel,
            Scale::Ordinal { max, .. } => max,
        }
    }
}

const NO_DATA_COLOR: &str = "#28272d";

// Sleep has no band between 0 and 50.
const SLEEP_BANDS: [Band; 8] = [
    Band::at_least(50.0),
    Band::at_least(55.0),
    Band::at_least(65.0),
    Band::at_least(75.0),
    Band::at_least(80.0),
    Band::at_least(85.0),
    Band::at_least(90.0),
    Band::at_least(95.0),
];

const STEPS_BANDS: [Band; 8] = [
    Band::above(0.0),
    Band::at_least(2_000.0),
    Band::at_least(3_500.0),
    Band::at_least(5_000.0),
    Band::at_least(7_500.0),
    Band::at_least(10_000.0),
    Band::at_least(12_500.0),
    Band::at_least(15_000.0),
];

const ACTIVITY_BANDS: [Band; 8] = [
    Band::above(0.0),
    Band::at_least(10.0),
    Band::at_least(20.0),
    Band::at_least(30.0),
    Band::at_least(40.0),
    Band::at_least(50.0),
    Band::at_least(60.0),
    Band::at_least(70.0),
];

/// Mood labels indexed by level; index 0 is "No data"
pub const MOOD_LABELS: [&str; 8] = [
    "No data",
    "Very Unpleasant",
    "Unpleasant",
    "Slightly Unpleasant",
    "Neutral",
    "Slightly Pleasant",
    "Pleasant",
    "Very Pleasant",
];

static SLEEP: MetricProfile = MetricProfile {
    kind: MetricKind::Sleep,
    display_name: "Sleep Score",
    scale: Scale::Banded(&SLEEP_BANDS),
    legend_labels: &[
        "No data", "50-54", "55-64", "65-74", "75-79", "80-84", "85-89", "90-94", "95-100",
    ],
    palette: &[
        NO_DATA_COLOR,
        "#303470",
        "#323c7d",
        "#3d4f9e",
        "#4e65cd",
        "#5f7ae6",
        "#7992f5",
        "#a6b5f9",
        "#d2dcff",
    ],
};

static STEPS: MetricProfile = MetricProfile {
    kind: MetricKind::Steps,
    display_name: "Steps",
    scale: Scale::Banded(&STEPS_BANDS),
    legend_labels: &[
        "No data",
        "1-1,999",
        "2,000-3,499",
        "3,500-4,999",
        "5,000-7,499",
        "7,500-9,999",
        "10,000-12,499",
        "12,500-14,999",
        "15,000+",
    ],
    palette: &[
        NO_DATA_COLOR,
        "#0a3318",
        "#0e4429",
        "#00581e",
        "#006d32",
        "#128a3f",
        "#26a641",
        "#39d353",
        "#57ff78",
    ],
};

static ACTIVITY: MetricProfile = MetricProfile {
    kind: MetricKind::Activity,
    display_name: "Activity",
    scale: Scale::Banded(&ACTIVITY_BANDS),
    legend_labels: &[
        "No data",
        "1-9 min",
        "10-19 min",
        "20-29 min",
        "30-39 min",
        "40-49 min",
        "50-59 min",
        "60-69 min",
        "70+ min",
    ],
    palette: &[
        NO_DATA_COLOR,
        "#5a1e0a",
        "#7c2d12",
        "#9a3412",
        "#c2410c",
        "#ea580c",
        "#fb923c",
        "#fdba74",
        "#fed7aa",
    ],
};

static MOOD: MetricProfile = MetricProfile {
    kind: MetricKind::Mood,
    display_name: "State of Mind",
    scale: Scale::Ordinal { min: 1, max: 7 },
    legend_labels: &MOOD_LABELS,
    palette: &[
        NO_DATA_COLOR,
        "#2d187c",
        "#013ebe",
        "#0060bb",
        "#3c9da8",
        "#2d9800",
        "#ffd600",
        "#fe7530",
    ],
};

impl MetricKind {
    pub fn profile(&self) -> &'static MetricProfile {
        match self {
            MetricKind::Sleep => &SLEEP,
            MetricKind::Steps => &STEPS,
            MetricKind::Activity => &ACTIVITY,
            MetricKind::Mood => &MOOD,
        }
    }

    pub fn max_level(&self) -> IntensityLevel {
        self.profile().max_level()
    }

    pub fn display_name(&self) -> &'static str {
        self.profile().display_name
    }
}

/// Format a raw value for a tooltip
pub fn format_value(value: Option<f64>, metric: MetricKind) -> String {
    let Some(value) = value else {
        return "No data".to_string();
    };

    match metric {
        MetricKind::Sleep => format!("{} score", format_number(value)),
        MetricKind::Steps => format!("{} steps", group_thousands(value)),
        MetricKind::Activity => format!("{} minutes", format_number(value)),
        MetricKind::Mood => mood_label(value)
            .map(str::to_string)
            .unwrap_or_else(|| format_number(value)),
    }
}

/// Format the average of a summary for the heading above a heatmap.
///
/// Returns `None` when no day in the window has data.
pub fn format_average(summary: &AggregateSummary, metric: MetricKind) -> Option<String> {
    let rounded = summary.average?.round();

    let text = match metric {
        MetricKind::Sleep => format_number(rounded),
        MetricKind::Steps => group_thousands(rounded),
        MetricKind::Activity => format!("{} min", format_number(rounded)),
        MetricKind::Mood => mood_label(rounded)
            .map(str::to_string)
            .unwrap_or_else(|| format_number(rounded)),
    };

    Some(format!("Avg: {text}"))
}

fn mood_label(value: f64) -> Option<&'static str> {
    if value.fract() != 0.0 || !(1.0..=7.0).contains(&value) {
        return None;
    }
    MOOD_LABELS.get(value as usize).copied()
}

/// Render a number without a trailing `.0` for integral values
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Render a number with `,` thousands separators in its integer part
pub fn group_thousands(value: f64) -> String {
    let plain = format_number(value.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (plain.as_str(), None),
    };

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(plain.len() + digits.len() / 3 + 1);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}
