//! Terminal styling helpers: colors, trends, table styles.

use airdash_core::{AirQuality, ThresholdSet};
use airdash_types::Metric;
use owo_colors::OwoColorize;

/// Get the terminal width, defaulting to 80 when undetectable.
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Apply the standard table style.
pub fn apply_table_style(table: &mut tabled::Table) {
    use tabled::settings::Style;
    table.with(Style::rounded());
}

/// Format an air-quality tier as a colored bracket label.
#[must_use]
pub fn format_quality(quality: AirQuality, no_color: bool) -> String {
    let label = match quality {
        AirQuality::Good => "GOOD",
        AirQuality::Moderate => "MODERATE",
        AirQuality::Poor => "POOR",
        AirQuality::Unknown => "UNKNOWN",
    };

    if no_color {
        format!("[{}]", label)
    } else {
        match quality {
            AirQuality::Good => format!("[{}]", label.green()),
            AirQuality::Moderate => format!("[{}]", label.yellow()),
            AirQuality::Poor => format!("[{}]", label.red()),
            AirQuality::Unknown => format!("[{}]", label.dimmed()),
        }
    }
}

/// Display precision per metric: benzene is measured in fractions of a ppm,
/// CO2 and LPG in hundreds.
#[must_use]
pub fn format_value(metric: Metric, value: f64) -> String {
    match metric {
        Metric::Co2 | Metric::Lpg => format!("{:.0}", value),
        Metric::Nh3 | Metric::Co => format!("{:.1}", value),
        Metric::Benzene => format!("{:.3}", value),
    }
}

/// Format a metric value, red when it exceeds its threshold.
#[must_use]
pub fn format_metric_colored(
    metric: Metric,
    value: f64,
    thresholds: &ThresholdSet,
    no_color: bool,
) -> String {
    let text = format_value(metric, value);
    if no_color || !(value > thresholds.limit(metric)) {
        text
    } else {
        format!("{}", text.red())
    }
}

/// Get trend indicator comparing to a previous value.
#[must_use]
pub fn trend_indicator(current: f64, previous: f64, no_color: bool) -> &'static str {
    let diff = current - previous;
    if diff.abs() < 0.5 {
        "-"
    } else if diff > 0.0 {
        if no_color { "^" } else { "↑" }
    } else if no_color {
        "v"
    } else {
        "↓"
    }
}
