//! Delimited-text export of critical events.
//!
//! Pure formatting over the output of
//! [`critical_events`](crate::quality::critical_events): one row per event
//! with the timestamp and the five concentration metrics. Metric values are
//! printed with their shortest round-trippable representation so that
//! export followed by [`parse_critical_events_csv`] is lossless.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use airdash_types::Reading;

/// Column header of the critical-events CSV.
pub const CSV_HEADER: &str = "timestamp,co2_ppm,nh3_ppm,benzene_ppm,lpg_ppm,co_ppm";

/// One exported critical event: the timestamp and the five metrics.
///
/// Temperature, humidity, and the opaque id are not part of the export
/// format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalRecord {
    /// When the event was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: time::OffsetDateTime,
    /// CO2 concentration in ppm.
    pub co2_ppm: f64,
    /// NH3 concentration in ppm.
    pub nh3_ppm: f64,
    /// Benzene concentration in ppm.
    pub benzene_ppm: f64,
    /// LPG concentration in ppm.
    pub lpg_ppm: f64,
    /// CO concentration in ppm.
    pub co_ppm: f64,
}

impl From<&Reading> for CriticalRecord {
    fn from(reading: &Reading) -> Self {
        Self {
            timestamp: reading.timestamp,
            co2_ppm: reading.co2_ppm,
            nh3_ppm: reading.nh3_ppm,
            benzene_ppm: reading.benzene_ppm,
            lpg_ppm: reading.lpg_ppm,
            co_ppm: reading.co_ppm,
        }
    }
}

/// Format critical events as CSV, header included.
///
/// Timestamps are RFC 3339 in the reading's own offset.
#[must_use]
pub fn critical_events_csv(events: &[Reading]) -> String {
    let mut output = String::from(CSV_HEADER);
    output.push('\n');

    for event in events {
        let ts = event
            .timestamp
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();
        output.push_str(&format!(
            "{},{},{},{},{},{}\n",
            ts,
            event.co2_ppm,
            event.nh3_ppm,
            event.benzene_ppm,
            event.lpg_ppm,
            event.co_ppm
        ));
    }

    output
}

/// Parse a critical-events CSV back into records.
///
/// Accepts input with or without the header row. Blank lines are skipped.
///
/// # Errors
///
/// Returns [`Error::InvalidData`] for rows with the wrong column count, an
/// unparseable timestamp, or a non-numeric metric value.
pub fn parse_critical_events_csv(input: &str) -> Result<Vec<CriticalRecord>> {
    let mut records = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line == CSV_HEADER {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 6 {
            return Err(Error::InvalidData(format!(
                "row {}: expected 6 columns, got {}",
                index + 1,
                fields.len()
            )));
        }

        let timestamp = time::OffsetDateTime::parse(
            fields[0],
            &time::format_description::well_known::Rfc3339,
        )
        .map_err(|e| Error::InvalidData(format!("row {}: bad timestamp: {}", index + 1, e)))?;

        let mut values = [0.0f64; 5];
        for (value, field) in values.iter_mut().zip(&fields[1..]) {
            *value = field.parse().map_err(|_| {
                Error::InvalidData(format!("row {}: bad metric value '{}'", index + 1, field))
            })?;
        }

        records.push(CriticalRecord {
            timestamp,
            co2_ppm: values[0],
            nh3_ppm: values[1],
            benzene_ppm: values[2],
            lpg_ppm: values[3],
            co_ppm: values[4],
        });
    }

    Ok(records)
}
