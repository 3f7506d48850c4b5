//! Readings command implementation.

use std::path::PathBuf;

use airdash_core::aggregate::window_readings;
use airdash_core::{ApiClient, ThresholdSet};
use anyhow::{Context, Result};

use crate::cli::{OutputFormat, WindowArgs};
use crate::config::Config;
use crate::format::{FormatOptions, format_readings_csv, format_readings_text};
use crate::util::{resolve_window, write_output};

/// Arguments for the readings command.
pub struct ReadingsArgs<'a> {
    pub window: &'a WindowArgs,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub opts: &'a FormatOptions,
}

pub async fn cmd_readings(
    client: &ApiClient,
    config: &Config,
    args: ReadingsArgs<'_>,
) -> Result<()> {
    let (window, selection) = resolve_window(args.window, config)?;

    let readings = client
        .fetch_readings()
        .await
        .context("Failed to fetch readings")?;
    let windowed = window_readings(&readings, &window);
    tracing::debug!(total = readings.len(), windowed = windowed.len(), %window, "windowed readings");

    let thresholds = ThresholdSet::default();
    let content = match args.format {
        OutputFormat::Json => args.opts.as_json(&windowed)?,
        OutputFormat::Csv => format_readings_csv(&windowed, &selection, args.opts),
        OutputFormat::Text => format_readings_text(&windowed, &selection, &thresholds, args.opts),
    };

    write_output(args.output, &content)?;
    Ok(())
}
