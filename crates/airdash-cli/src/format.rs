//! Output formatting utilities for text, JSON, and CSV output.

use airdash_core::{AirQuality, ThresholdSet};
use airdash_types::{AggregatedSeries, Metric, MetricSelection, Reading};
use anyhow::Result;
use serde::Serialize;

use crate::style;

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            no_header: false,
            compact: false,
        }
    }

    /// Create with no_header option for CSV output.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }
}

/// Escape a string for CSV output.
/// Wraps the value in quotes if it contains commas, quotes, or newlines.
/// Double quotes are escaped by doubling them.
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Format a timestamp as RFC 3339.
#[must_use]
pub fn format_timestamp(timestamp: time::OffsetDateTime) -> String {
    timestamp
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "Unknown".to_string())
}

/// Compact timestamp for narrow tables: YYYY-MM-DD HH:MM.
fn format_timestamp_compact(timestamp: time::OffsetDateTime) -> String {
    timestamp
        .format(
            &time::format_description::parse("[year]-[month]-[day] [hour]:[minute]")
                .expect("valid format"),
        )
        .unwrap_or_else(|_| "Unknown".to_string())
}

// ============================================================================
// Status
// ============================================================================

/// Format the quality verdict as one line plus its description.
#[must_use]
pub fn format_status_text(
    quality: AirQuality,
    latest: Option<&Reading>,
    thresholds: &ThresholdSet,
    opts: &FormatOptions,
) -> String {
    let label = style::format_quality(quality, opts.no_color);

    match latest {
        Some(reading) => {
            let exceeded = thresholds.exceeded_metrics(reading);
            let detail = if exceeded.is_empty() {
                "no exceedances".to_string()
            } else {
                let names: Vec<&str> = exceeded.iter().map(|m| m.label()).collect();
                format!("exceeding: {}", names.join(", "))
            };
            format!(
                "{} {} ({}, latest {})\n",
                label,
                quality.description(),
                detail,
                format_timestamp(reading.timestamp)
            )
        }
        None => format!("{} {}\n", label, quality.description()),
    }
}

/// Format the quality verdict as JSON output
pub fn format_status_json(
    quality: AirQuality,
    latest: Option<&Reading>,
    thresholds: &ThresholdSet,
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    struct StatusJson {
        status: String,
        description: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        exceedances: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        exceeded_metrics: Option<Vec<String>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        latest_timestamp: Option<String>,
    }

    let json = StatusJson {
        status: quality.to_string(),
        description: quality.description(),
        exceedances: latest.map(|r| thresholds.exceedance_count(r)),
        exceeded_metrics: latest.map(|r| {
            thresholds
                .exceeded_metrics(r)
                .iter()
                .map(|m| m.label().to_string())
                .collect()
        }),
        latest_timestamp: latest.map(|r| format_timestamp(r.timestamp)),
    };

    opts.as_json(&json)
}

/// Format the quality verdict as CSV output
#[must_use]
pub fn format_status_csv(
    quality: AirQuality,
    latest: Option<&Reading>,
    thresholds: &ThresholdSet,
    opts: &FormatOptions,
) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "status,exceedances,latest_timestamp\n".to_string()
    };

    let (exceedances, timestamp) = match latest {
        Some(r) => (
            thresholds.exceedance_count(r).to_string(),
            format_timestamp(r.timestamp),
        ),
        None => (String::new(), String::new()),
    };
    output.push_str(&format!("{},{},{}\n", quality, exceedances, timestamp));
    output
}

// ============================================================================
// Latest reading
// ============================================================================

/// Format a full reading as a labelled panel.
#[must_use]
pub fn format_reading_text(
    reading: &Reading,
    thresholds: &ThresholdSet,
    opts: &FormatOptions,
) -> String {
    let mut output = format!("Latest reading ({})\n", format_timestamp(reading.timestamp));
    output.push_str(&format!("  Temperature  {:>8.1} °C\n", reading.temperature));
    output.push_str(&format!("  Humidity     {:>8.1} %\n", reading.humidity));
    for metric in Metric::ALL {
        output.push_str(&format!(
            "  {:<12} {:>8} ppm\n",
            metric.label(),
            style::format_metric_colored(metric, reading.metric(metric), thresholds, opts.no_color)
        ));
    }
    output
}

/// Format a full reading as JSON output
pub fn format_reading_json(reading: &Reading, opts: &FormatOptions) -> Result<String> {
    opts.as_json(reading)
}

/// Format a full reading as CSV output
#[must_use]
pub fn format_reading_csv(reading: &Reading, opts: &FormatOptions) -> String {
    let mut output = if opts.no_header {
        String::new()
    } else {
        "timestamp,temperature,humidity,co2_ppm,nh3_ppm,benzene_ppm,lpg_ppm,co_ppm\n".to_string()
    };
    output.push_str(&reading_csv_line(reading));
    output
}

fn reading_csv_line(reading: &Reading) -> String {
    format!(
        "{},{},{},{},{},{},{},{}\n",
        format_timestamp(reading.timestamp),
        reading.temperature,
        reading.humidity,
        reading.co2_ppm,
        reading.nh3_ppm,
        reading.benzene_ppm,
        reading.lpg_ppm,
        reading.co_ppm
    )
}

// ============================================================================
// Windowed readings
// ============================================================================

/// Format windowed readings as a table.
#[must_use]
pub fn format_readings_text(
    readings: &[Reading],
    selection: &MetricSelection,
    thresholds: &ThresholdSet,
    opts: &FormatOptions,
) -> String {
    use tabled::builder::Builder;

    if readings.is_empty() {
        return "No readings in the selected window.\n".to_string();
    }

    // Narrow terminals get fewer records to avoid wrapping issues
    let term_width = style::terminal_width();
    let max_records = if term_width < 80 { 10 } else { 20 };
    let use_compact_ts = term_width < 100;

    let metrics = selection.selected();
    let mut output = format!("Readings ({} in window):\n\n", readings.len());

    let mut builder = Builder::default();
    let mut header = vec!["Timestamp".to_string(), "Temp (C)".to_string(), "Humidity".to_string()];
    header.extend(metrics.iter().map(|m| m.label().to_string()));
    builder.push_record(header);

    for reading in readings.iter().take(max_records) {
        let ts = if use_compact_ts {
            format_timestamp_compact(reading.timestamp)
        } else {
            format_timestamp(reading.timestamp)
        };
        let mut row = vec![
            ts,
            format!("{:.1}", reading.temperature),
            format!("{:.1}%", reading.humidity),
        ];
        row.extend(metrics.iter().map(|m| {
            style::format_metric_colored(*m, reading.metric(*m), thresholds, opts.no_color)
        }));
        builder.push_record(row);
    }

    let mut table = builder.build();
    style::apply_table_style(&mut table);
    output.push_str(&table.to_string());
    output.push('\n');

    if readings.len() > max_records {
        output.push_str(&format!(
            "... and {} more readings\n",
            readings.len() - max_records
        ));
        output.push_str("(Use --format csv or --format json for full data)\n");
    }

    output
}

/// Format windowed readings as CSV output
#[must_use]
pub fn format_readings_csv(
    readings: &[Reading],
    selection: &MetricSelection,
    opts: &FormatOptions,
) -> String {
    let metrics = selection.selected();

    let mut output = if opts.no_header {
        String::new()
    } else {
        let mut header = vec!["timestamp", "temperature", "humidity"];
        header.extend(metrics.iter().map(|m| metric_csv_header(*m)));
        format!("{}\n", header.join(","))
    };

    for reading in readings {
        let mut fields = vec![
            format_timestamp(reading.timestamp),
            reading.temperature.to_string(),
            reading.humidity.to_string(),
        ];
        fields.extend(metrics.iter().map(|m| reading.metric(*m).to_string()));
        output.push_str(&fields.join(","));
        output.push('\n');
    }

    output
}

fn metric_csv_header(metric: Metric) -> &'static str {
    match metric {
        Metric::Co2 => "co2_ppm",
        Metric::Nh3 => "nh3_ppm",
        Metric::Benzene => "benzene_ppm",
        Metric::Lpg => "lpg_ppm",
        Metric::Co => "co_ppm",
    }
}

// ============================================================================
// Aggregated series
// ============================================================================

/// Format an aggregated series as a table.
#[must_use]
pub fn format_series_text(
    series: &AggregatedSeries,
    selection: &MetricSelection,
    thresholds: &ThresholdSet,
    opts: &FormatOptions,
) -> String {
    use tabled::builder::Builder;

    match series {
        // Short windows pass raw readings through; show them as a readings table.
        AggregatedSeries::Raw(readings) => {
            format_readings_text(readings, selection, thresholds, opts)
        }
        AggregatedSeries::Buckets(buckets) => {
            if buckets.is_empty() {
                return "No data in the selected window.\n".to_string();
            }

            let metrics = selection.selected();
            let mut output = format!("Series ({} buckets):\n\n", buckets.len());

            let mut builder = Builder::default();
            let mut header = vec!["Time".to_string()];
            header.extend(metrics.iter().map(|m| format!("{} (avg)", m.label())));
            builder.push_record(header);

            for bucket in buckets {
                let mut row = vec![bucket.label.clone()];
                row.extend(metrics.iter().map(|m| match bucket.value(*m) {
                    Some(v) => style::format_value(*m, v),
                    None => String::new(),
                }));
                builder.push_record(row);
            }

            let mut table = builder.build();
            style::apply_table_style(&mut table);
            output.push_str(&table.to_string());
            output.push('\n');
            output
        }
    }
}

/// Format an aggregated series as CSV output
#[must_use]
pub fn format_series_csv(
    series: &AggregatedSeries,
    selection: &MetricSelection,
    opts: &FormatOptions,
) -> String {
    match series {
        AggregatedSeries::Raw(readings) => format_readings_csv(readings, selection, opts),
        AggregatedSeries::Buckets(buckets) => {
            let metrics = selection.selected();

            let mut output = if opts.no_header {
                String::new()
            } else {
                let mut header = vec!["time"];
                header.extend(metrics.iter().map(|m| metric_csv_header(*m)));
                format!("{}\n", header.join(","))
            };

            for bucket in buckets {
                let mut fields = vec![csv_escape(&bucket.label)];
                fields.extend(metrics.iter().map(|m| {
                    bucket.value(*m).map(|v| v.to_string()).unwrap_or_default()
                }));
                output.push_str(&fields.join(","));
                output.push('\n');
            }

            output
        }
    }
}

// ============================================================================
// Critical events
// ============================================================================

/// Format critical events as a table, exceeding values highlighted.
#[must_use]
pub fn format_critical_text(
    events: &[Reading],
    thresholds: &ThresholdSet,
    opts: &FormatOptions,
) -> String {
    use tabled::builder::Builder;

    if events.is_empty() {
        return "No critical events.\n".to_string();
    }

    let term_width = style::terminal_width();
    let max_records = if term_width < 80 { 10 } else { 20 };
    let use_compact_ts = term_width < 100;

    let mut output = format!("Critical events ({}):\n\n", events.len());

    let mut builder = Builder::default();
    builder.push_record(["Timestamp", "CO2", "NH3", "Benzene", "LPG", "CO"]);

    for event in events.iter().take(max_records) {
        let ts = if use_compact_ts {
            format_timestamp_compact(event.timestamp)
        } else {
            format_timestamp(event.timestamp)
        };
        let mut row = vec![ts];
        row.extend(Metric::ALL.iter().map(|m| {
            style::format_metric_colored(*m, event.metric(*m), thresholds, opts.no_color)
        }));
        builder.push_record(row);
    }

    let mut table = builder.build();
    style::apply_table_style(&mut table);
    output.push_str(&table.to_string());
    output.push('\n');

    if events.len() > max_records {
        output.push_str(&format!(
            "... and {} more events\n",
            events.len() - max_records
        ));
        output.push_str("(Use --format csv for the full export)\n");
    }

    output
}

// ============================================================================
// Watch
// ============================================================================

/// CSV header for watch output.
#[must_use]
pub fn format_watch_csv_header(opts: &FormatOptions) -> String {
    if opts.no_header {
        String::new()
    } else {
        "polled_at,status,timestamp,temperature,humidity,co2_ppm,nh3_ppm,benzene_ppm,lpg_ppm,co_ppm\n"
            .to_string()
    }
}

/// One CSV line of watch output.
#[must_use]
pub fn format_watch_csv_line(polled_at: &str, quality: AirQuality, reading: &Reading) -> String {
    format!(
        "{},{},{}",
        polled_at,
        quality,
        reading_csv_line(reading)
    )
}
