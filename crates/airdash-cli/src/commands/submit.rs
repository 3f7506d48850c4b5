//! Submit command implementation.

use airdash_core::{ApiClient, NewReading};
use anyhow::{Context, Result};

/// Arguments for the submit command.
pub struct SubmitArgs {
    pub timestamp: Option<String>,
    pub temperature: f64,
    pub humidity: f64,
    pub co2: f64,
    pub nh3: f64,
    pub benzene: f64,
    pub lpg: f64,
    pub co: f64,
}

pub async fn cmd_submit(client: &ApiClient, args: SubmitArgs, quiet: bool) -> Result<()> {
    let timestamp = match &args.timestamp {
        Some(s) => time::OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339)
            .with_context(|| {
                format!("Invalid timestamp '{}'. Use RFC3339 (e.g., 2026-03-05T09:12:00Z)", s)
            })?,
        None => time::OffsetDateTime::now_utc(),
    };

    let reading = NewReading {
        timestamp,
        temperature: args.temperature,
        humidity: args.humidity,
        co2_ppm: args.co2,
        nh3_ppm: args.nh3,
        benzene_ppm: args.benzene,
        lpg_ppm: args.lpg,
        co_ppm: args.co,
    };

    client
        .submit_reading(&reading)
        .await
        .context("Failed to submit reading")?;

    if !quiet {
        eprintln!(
            "Submitted reading at {}.",
            crate::format::format_timestamp(timestamp)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_timestamps_parse() {
        let ts = time::OffsetDateTime::parse(
            "2026-03-05T09:12:00Z",
            &time::format_description::well_known::Rfc3339,
        )
        .unwrap();
        assert_eq!(ts.time().hour(), 9);
    }
}
