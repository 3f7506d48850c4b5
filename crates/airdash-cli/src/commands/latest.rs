//! Latest command implementation.

use std::path::PathBuf;

use airdash_core::aggregate::most_recent;
use airdash_core::{ApiClient, ThresholdSet};
use anyhow::{Context, Result};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_reading_csv, format_reading_json, format_reading_text};
use crate::util::write_output;

pub async fn cmd_latest(
    client: &ApiClient,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let readings = client
        .fetch_readings()
        .await
        .context("Failed to fetch readings")?;

    let thresholds = ThresholdSet::default();

    // Absent is a real state: render it, never a zeroed reading.
    let content = match most_recent(&readings) {
        Some(reading) => match format {
            OutputFormat::Json => format_reading_json(reading, opts)?,
            OutputFormat::Csv => format_reading_csv(reading, opts),
            OutputFormat::Text => format_reading_text(reading, &thresholds, opts),
        },
        None => match format {
            OutputFormat::Json => opts.as_json(&serde_json::Value::Null)?,
            OutputFormat::Csv => format_reading_csv_empty(opts),
            OutputFormat::Text => "No readings available.\n".to_string(),
        },
    };

    write_output(output, &content)?;
    Ok(())
}

fn format_reading_csv_empty(opts: &FormatOptions) -> String {
    if opts.no_header {
        String::new()
    } else {
        "timestamp,temperature,humidity,co2_ppm,nh3_ppm,benzene_ppm,lpg_ppm,co_ppm\n".to_string()
    }
}
