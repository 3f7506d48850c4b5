//! Critical-events command implementation.

use std::path::PathBuf;

use airdash_core::{ApiClient, ThresholdSet, critical_events, critical_events_csv};
use anyhow::{Context, Result};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_critical_text};
use crate::util::write_output;

pub async fn cmd_critical(
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
    // Exceedances are scanned across the whole dataset, not a display window.
    let critical = critical_events(&readings, &thresholds);

    let content = match format {
        OutputFormat::Json => opts.as_json(&critical)?,
        OutputFormat::Csv => {
            let csv = critical_events_csv(&critical);
            if opts.no_header {
                csv.lines().skip(1).map(|l| format!("{}\n", l)).collect()
            } else {
                csv
            }
        }
        OutputFormat::Text => format_critical_text(&critical, &thresholds, opts),
    };

    write_output(output, &content)?;
    Ok(())
}
