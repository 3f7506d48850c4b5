//! Utility functions for CLI operations.

use std::io::{self, Write};
use std::path::PathBuf;

use airdash_core::ApiClient;
use airdash_types::{Metric, MetricSelection, TimeWindow};
use anyhow::{Context, Result, bail};
use chrono::Datelike;

use crate::cli::WindowArgs;
use crate::config::{Config, resolve_timeout, resolve_url};

/// Write content to a file or stdout.
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}

/// Build an API client from the resolved URL and timeout, attaching the
/// stored token.
pub fn build_client(url: Option<String>, timeout: u64, config: &Config) -> Result<ApiClient> {
    let url = resolve_url(url, config);
    let timeout = resolve_timeout(timeout, config, 10);
    let client = ApiClient::with_timeout(&url, std::time::Duration::from_secs(timeout))
        .with_context(|| format!("Invalid API URL '{}'", url))?;
    Ok(match &config.token {
        Some(token) => client.with_token(token.clone()),
        None => client,
    })
}

/// Parse a calendar date in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> Result<time::Date> {
    let format =
        time::format_description::parse("[year]-[month]-[day]").expect("valid format description");
    time::Date::parse(s, &format)
        .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD", s))
}

/// Parse a time of day in HH:MM format into a minute offset from midnight.
pub fn parse_minute(s: &str) -> Result<u16> {
    let Some((hours, minutes)) = s.split_once(':') else {
        bail!("Invalid time '{}'. Use HH:MM", s);
    };
    let hours: u16 = hours
        .parse()
        .with_context(|| format!("Invalid time '{}'. Use HH:MM", s))?;
    let minutes: u16 = minutes
        .parse()
        .with_context(|| format!("Invalid time '{}'. Use HH:MM", s))?;
    if hours > 23 || minutes > 59 {
        bail!("Invalid time '{}': out of range", s);
    }
    Ok(hours * 60 + minutes)
}

/// Today's date on the local clock.
pub fn today_local() -> time::Date {
    let now = chrono::Local::now().date_naive();
    time::Date::from_calendar_date(
        now.year(),
        time::Month::try_from(now.month() as u8).expect("valid month"),
        now.day() as u8,
    )
    .expect("valid local date")
}

/// Resolve window flags into a core time window plus metric selection.
///
/// The date defaults to today; the metric list defaults to the configured
/// toggles.
pub fn resolve_window(args: &WindowArgs, config: &Config) -> Result<(TimeWindow, MetricSelection)> {
    let day = match &args.date {
        Some(s) => parse_date(s)?,
        None => today_local(),
    };
    let start = parse_minute(&args.from)?;
    let end = parse_minute(&args.to)?;
    if start > end {
        bail!(
            "Window start {} is after end {}; nothing would be selected",
            args.from,
            args.to
        );
    }

    let selection = if args.metrics.is_empty() {
        config.metrics.to_selection()
    } else {
        let mut metrics = Vec::new();
        for name in &args.metrics {
            let metric: Metric = name
                .parse()
                .with_context(|| format!("Invalid metric '{}'", name))?;
            metrics.push(metric);
        }
        MetricSelection::from_metrics(&metrics)
    };

    Ok((TimeWindow::new(day, start, end), selection))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let date = parse_date("2026-03-05").unwrap();
        assert_eq!(date.year(), 2026);
        assert_eq!(date.month(), time::Month::March);
        assert_eq!(date.day(), 5);

        assert!(parse_date("05.03.2026").is_err());
        assert!(parse_date("2026-13-01").is_err());
    }

    #[test]
    fn test_parse_minute() {
        assert_eq!(parse_minute("00:00").unwrap(), 0);
        assert_eq!(parse_minute("09:30").unwrap(), 570);
        assert_eq!(parse_minute("23:59").unwrap(), 1439);

        assert!(parse_minute("24:00").is_err());
        assert!(parse_minute("12:60").is_err());
        assert!(parse_minute("noon").is_err());
    }

    #[test]
    fn test_resolve_window_defaults() {
        let args = WindowArgs {
            date: Some("2026-03-05".to_string()),
            from: "00:00".to_string(),
            to: "23:59".to_string(),
            metrics: vec![],
        };
        let (window, selection) = resolve_window(&args, &Config::default()).unwrap();
        assert_eq!(window.start_minute, 0);
        assert_eq!(window.end_minute, 1439);
        assert_eq!(selection, MetricSelection::all());
    }

    #[test]
    fn test_resolve_window_metric_list() {
        let args = WindowArgs {
            date: Some("2026-03-05".to_string()),
            from: "09:00".to_string(),
            to: "17:00".to_string(),
            metrics: vec!["co2".to_string(), "co".to_string()],
        };
        let (window, selection) = resolve_window(&args, &Config::default()).unwrap();
        assert_eq!(window.start_minute, 540);
        assert_eq!(window.end_minute, 1020);
        assert_eq!(
            selection,
            MetricSelection::from_metrics(&[Metric::Co2, Metric::Co])
        );
    }

    #[test]
    fn test_resolve_window_rejects_inverted_range() {
        let args = WindowArgs {
            date: Some("2026-03-05".to_string()),
            from: "17:00".to_string(),
            to: "09:00".to_string(),
            metrics: vec![],
        };
        assert!(resolve_window(&args, &Config::default()).is_err());
    }

    #[test]
    fn test_resolve_window_rejects_unknown_metric() {
        let args = WindowArgs {
            date: Some("2026-03-05".to_string()),
            from: "00:00".to_string(),
            to: "23:59".to_string(),
            metrics: vec!["pm25".to_string()],
        };
        assert!(resolve_window(&args, &Config::default()).is_err());
    }

    #[test]
    fn test_build_client_attaches_token() {
        let config = Config {
            token: Some("abc".to_string()),
            ..Default::default()
        };
        let client = build_client(None, 10, &config).unwrap();
        assert!(client.is_authenticated());
        assert_eq!(client.base_url(), crate::config::DEFAULT_API_URL);
    }
}
