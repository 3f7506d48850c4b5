//! Watch command implementation.
//!
//! Polls the API on a fixed interval and prints the latest reading with its
//! quality verdict. Fetch failures are reported and retried on the next
//! poll; Ctrl-C stops the loop between polls, so no further requests are
//! issued once the watch is torn down.

use std::path::PathBuf;
use std::time::Duration;

use airdash_core::aggregate::most_recent;
use airdash_core::{AirQuality, ApiClient, ThresholdSet, classify_air_quality};
use airdash_types::{Metric, Reading};
use anyhow::Result;

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_watch_csv_header, format_watch_csv_line};
use crate::style;
use crate::util::write_output;

/// Arguments for the watch command.
pub struct WatchArgs<'a> {
    pub interval: u64,
    pub count: u32,
    pub format: OutputFormat,
    pub output: Option<&'a PathBuf>,
    pub opts: &'a FormatOptions,
}

pub async fn cmd_watch(client: &ApiClient, args: WatchArgs<'_>) -> Result<()> {
    let WatchArgs {
        interval,
        count,
        format,
        output,
        opts,
    } = args;

    eprintln!("Watching: {}", client.base_url());
    if count > 0 {
        eprintln!(
            "Interval: {}s | Count: {} | Press Ctrl+C to stop",
            interval, count
        );
    } else {
        eprintln!("Interval: {}s | Press Ctrl+C to stop", interval);
    }
    eprintln!("{}", "-".repeat(50));

    let thresholds = ThresholdSet::default();
    let mut header_written = opts.no_header;
    let mut polls_taken: u32 = 0;
    let mut previous: Option<Reading> = None;

    loop {
        // Check if we've reached the count limit
        if count > 0 && polls_taken >= count {
            eprintln!("Completed {} polls.", polls_taken);
            return Ok(());
        }

        match client.fetch_readings().await {
            Ok(readings) => {
                polls_taken += 1;
                let latest = most_recent(&readings);
                let quality = classify_air_quality(latest, &thresholds);
                let polled_at = chrono::Local::now().format("%H:%M:%S").to_string();

                let content = match format {
                    OutputFormat::Json => format_poll_json(&polled_at, quality, latest, opts)?,
                    OutputFormat::Csv => match latest {
                        Some(reading) => {
                            let mut out = String::new();
                            if !header_written {
                                out.push_str(&format_watch_csv_header(opts));
                                header_written = true;
                            }
                            out.push_str(&format_watch_csv_line(&polled_at, quality, reading));
                            out
                        }
                        None => String::new(),
                    },
                    OutputFormat::Text => format_watch_line(
                        &polled_at,
                        quality,
                        latest,
                        previous.as_ref(),
                        &thresholds,
                        opts,
                    ),
                };
                write_output(output, &content)?;
                previous = latest.cloned();
            }
            Err(e) => {
                eprintln!("Fetch failed: {}. Will retry on next poll.", e);
            }
        }

        // Check if we've reached the count limit after this poll
        if count > 0 && polls_taken >= count {
            continue; // Loop will exit at the top
        }

        // Wait for next interval with graceful shutdown support
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nShutting down...");
                return Ok(());
            }
            _ = tokio::time::sleep(Duration::from_secs(interval)) => {}
        }
    }
}

fn format_poll_json(
    polled_at: &str,
    quality: AirQuality,
    latest: Option<&Reading>,
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(serde::Serialize)]
    struct PollJson<'a> {
        polled_at: &'a str,
        status: String,
        reading: Option<&'a Reading>,
    }

    opts.as_json(&PollJson {
        polled_at,
        status: quality.to_string(),
        reading: latest,
    })
}

/// Format a watch line with trend indicators comparing to the previous poll.
fn format_watch_line(
    polled_at: &str,
    quality: AirQuality,
    latest: Option<&Reading>,
    previous: Option<&Reading>,
    thresholds: &ThresholdSet,
    opts: &FormatOptions,
) -> String {
    let quality_display = style::format_quality(quality, opts.no_color);

    let Some(reading) = latest else {
        return format!("[{}] {} no data\n", polled_at, quality_display);
    };

    // "~" on the first poll: no change data yet, distinct from "no change".
    let co2_trend = previous
        .map(|p| style::trend_indicator(reading.co2_ppm, p.co2_ppm, opts.no_color))
        .unwrap_or("~");
    let temp_trend = previous
        .map(|p| style::trend_indicator(reading.temperature, p.temperature, opts.no_color))
        .unwrap_or("~");

    let co2_display = style::format_metric_colored(
        Metric::Co2,
        reading.co2_ppm,
        thresholds,
        opts.no_color,
    );
    let co_display =
        style::format_metric_colored(Metric::Co, reading.co_ppm, thresholds, opts.no_color);

    format!(
        "[{}] {} CO2 {} ppm {} | {:.1}°C {} | {:.1}% | CO {} ppm\n",
        polled_at,
        quality_display,
        co2_display,
        co2_trend,
        reading.temperature,
        temp_trend,
        reading.humidity,
        co_display
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(co2: f64, temperature: f64) -> Reading {
        Reading::builder()
            .co2_ppm(co2)
            .temperature(temperature)
            .humidity(40.0)
            .co_ppm(2.0)
            .build()
    }

    #[test]
    fn test_watch_line_without_data() {
        let opts = FormatOptions::new(true);
        let line = format_watch_line(
            "12:00:00",
            AirQuality::Unknown,
            None,
            None,
            &ThresholdSet::default(),
            &opts,
        );
        assert_eq!(line, "[12:00:00] [UNKNOWN] no data\n");
    }

    #[test]
    fn test_watch_line_first_poll_has_placeholder_trends() {
        let opts = FormatOptions::new(true);
        let r = reading(720.0, 21.4);
        let line = format_watch_line(
            "12:00:00",
            AirQuality::Good,
            Some(&r),
            None,
            &ThresholdSet::default(),
            &opts,
        );
        assert!(line.contains("CO2 720 ppm ~"));
        assert!(line.contains("21.4°C ~"));
    }

    #[test]
    fn test_watch_line_shows_trends_against_previous() {
        let opts = FormatOptions::new(true);
        let prev = reading(700.0, 21.4);
        let curr = reading(750.0, 20.0);
        let line = format_watch_line(
            "12:01:00",
            AirQuality::Good,
            Some(&curr),
            Some(&prev),
            &ThresholdSet::default(),
            &opts,
        );
        assert!(line.contains("CO2 750 ppm ^"));
        assert!(line.contains("20.0°C v"));
    }
}
