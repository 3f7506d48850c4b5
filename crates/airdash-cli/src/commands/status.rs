//! Status command implementation.

use std::path::PathBuf;

use airdash_core::aggregate::most_recent;
use airdash_core::{ApiClient, ThresholdSet, classify_air_quality};
use anyhow::{Context, Result};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_status_csv, format_status_json, format_status_text};
use crate::util::write_output;

pub async fn cmd_status(
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
    let latest = most_recent(&readings);
    let quality = classify_air_quality(latest, &thresholds);

    let content = match format {
        OutputFormat::Json => format_status_json(quality, latest, &thresholds, opts)?,
        OutputFormat::Csv => format_status_csv(quality, latest, &thresholds, opts),
        OutputFormat::Text => format_status_text(quality, latest, &thresholds, opts),
    };

    write_output(output, &content)?;
    Ok(())
}
