//! Series command implementation.

use std::path::PathBuf;

use airdash_core::aggregate::{aggregate_by_interval, window_readings};
use airdash_core::{ApiClient, ThresholdSet};
use anyhow::{Context, Result};

use crate::cli::{OutputFormat, WindowArgs};
use crate::config::Config;
use crate::format::{FormatOptions, format_series_csv, format_series_text};
use crate::util::{resolve_window, write_output};

/// Arguments for the series command.
pub struct SeriesArgs<'a> {
    pub window: &'a WindowArgs,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub opts: &'a FormatOptions,
}

pub async fn cmd_series(client: &ApiClient, config: &Config, args: SeriesArgs<'_>) -> Result<()> {
    let (window, selection) = resolve_window(args.window, config)?;

    let readings = client
        .fetch_readings()
        .await
        .context("Failed to fetch readings")?;
    let windowed = window_readings(&readings, &window);
    let series = aggregate_by_interval(&windowed, &window, &selection);
    tracing::debug!(windowed = windowed.len(), points = series.len(), %window, "aggregated series");

    let thresholds = ThresholdSet::default();
    let content = match args.format {
        OutputFormat::Json => args.opts.as_json(&series)?,
        OutputFormat::Csv => format_series_csv(&series, &selection, args.opts),
        OutputFormat::Text => format_series_text(&series, &selection, &thresholds, args.opts),
    };

    write_output(args.output, &content)?;
    Ok(())
}
