//! Aggregation core and HTTP client for the airdash air-quality dashboard.
//!
//! This crate owns the one piece of real computation in the system — the
//! time-windowed aggregation and threshold pass over sensor readings — plus
//! the HTTP collaborator that fetches them and the CSV sink that exports
//! critical events.
//!
//! # Features
//!
//! - **Windowed filtering**: select readings by calendar day and time-of-day range
//! - **Latest reading**: the newest sample across the whole dataset
//! - **Critical events**: readings with any metric above its threshold
//! - **Bucketed averaging**: time-bucket means with window-length-dependent widths
//! - **Air-quality classification**: Good / Moderate / Poor / Unknown tiers
//! - **API client**: fetch, login, subscribe, submit via `reqwest`
//! - **CSV export**: lossless export/parse of critical events
//!
//! # Pipeline
//!
//! Every operation is a pure, stateless transform over an immutable snapshot
//! of fetched readings. The expected shape of a refresh cycle:
//!
//! ```no_run
//! use airdash_core::{ApiClient, ThresholdSet, classify_air_quality, critical_events,
//!     aggregate::{aggregate_by_interval, most_recent, window_readings}};
//! use airdash_types::{MetricSelection, TimeWindow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new("http://localhost:5154")?;
//!     let readings = client.fetch_readings().await?;
//!
//!     let day = time::Date::from_calendar_date(2026, time::Month::March, 5)?;
//!     let window = TimeWindow::new(day, 540, 1020); // 09:00-17:00
//!     let thresholds = ThresholdSet::default();
//!
//!     let windowed = window_readings(&readings, &window);
//!     let series = aggregate_by_interval(&windowed, &window, &MetricSelection::all());
//!     let quality = classify_air_quality(most_recent(&readings), &thresholds);
//!     let critical = critical_events(&readings, &thresholds);
//!
//!     println!("{} points, quality {}, {} critical", series.len(), quality, critical.len());
//!     Ok(())
//! }
//! ```
//!
//! Concurrent refreshes are not de-duplicated or coalesced here; whether
//! overlapping fetches can happen is a property of the caller's scheduler.

pub mod aggregate;
pub mod client;
pub mod error;
pub mod export;
pub mod quality;

// Core exports
pub use aggregate::{
    RAW_WINDOW_MAX_MINUTES, aggregate_by_interval, bucket_width_minutes, most_recent,
    window_readings,
};
pub use client::{ApiClient, AuthToken, NewReading};
pub use error::{Error, Result};
pub use export::{CSV_HEADER, CriticalRecord, critical_events_csv, parse_critical_events_csv};
pub use quality::{AirQuality, ThresholdSet, classify_air_quality, critical_events};

// Re-export from airdash-types
pub use airdash_types::{
    AggregatedBucket, AggregatedSeries, Metric, MetricSelection, Reading, TimeWindow,
};
