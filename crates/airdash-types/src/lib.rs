//! Platform-agnostic types for the airdash air-quality dashboard.
//!
//! This crate provides the shared data types consumed by the aggregation
//! core (airdash-core) and the command-line dashboard (airdash-cli).
//!
//! # Features
//!
//! - Sensor reading and metric types matching the HTTP API wire format
//! - Time-of-day window and metric selection types
//! - Aggregated series types produced by the core
//! - Error types for data parsing
//!
//! # Example
//!
//! ```
//! use airdash_types::{Metric, MetricSelection, Reading, TimeWindow};
//!
//! let day = time::Date::from_calendar_date(2026, time::Month::March, 5).unwrap();
//! let window = TimeWindow::new(day, 540, 600); // 09:00-10:00
//! let selection = MetricSelection::from_metrics(&[Metric::Co2]);
//! # let _ = (window, selection);
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    AggregatedBucket, AggregatedSeries, MAX_MINUTE, Metric, MetricSelection, Reading,
    ReadingBuilder, TimeWindow,
};

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn sample_reading() -> Reading {
        let timestamp = time::Date::from_calendar_date(2026, Month::March, 5)
            .unwrap()
            .with_hms(9, 12, 0)
            .unwrap()
            .assume_utc();
        Reading::builder()
            .id(17)
            .timestamp(timestamp)
            .temperature(21.4)
            .humidity(38.0)
            .co2_ppm(720.0)
            .nh3_ppm(12.0)
            .benzene_ppm(0.03)
            .lpg_ppm(410.0)
            .co_ppm(2.1)
            .build()
    }

    #[test]
    fn test_reading_serializes_camel_case() {
        let json = serde_json::to_string(&sample_reading()).unwrap();
        assert!(json.contains("\"co2Ppm\":720.0"));
        assert!(json.contains("\"nh3Ppm\":12.0"));
        assert!(json.contains("\"benzenePpm\":0.03"));
        assert!(json.contains("\"lpgPpm\":410.0"));
        assert!(json.contains("\"coPpm\":2.1"));
        assert!(json.contains("\"timestamp\":\"2026-03-05T09:12:00Z\""));
    }

    #[test]
    fn test_reading_deserializes_wire_payload() {
        let json = r#"{"id": 17, "timestamp": "2026-03-05T09:12:00Z",
            "temperature": 21.4, "humidity": 38.0, "co2Ppm": 720.0,
            "nh3Ppm": 12.0, "benzenePpm": 0.03, "lpgPpm": 410.0, "coPpm": 2.1}"#;

        let reading: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(reading, sample_reading());
    }

    #[test]
    fn test_reading_deserializes_without_id() {
        // Some historical payloads omit the identifier entirely.
        let json = r#"{"timestamp": "2026-03-05T09:12:00Z", "temperature": 20.0,
            "humidity": 40.0, "co2Ppm": 500.0, "nh3Ppm": 1.0, "benzenePpm": 0.01,
            "lpgPpm": 100.0, "coPpm": 1.0}"#;

        let reading: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.id, 0);
    }

    #[test]
    fn test_reading_roundtrip() {
        let reading = sample_reading();
        let json = serde_json::to_string(&reading).unwrap();
        let back: Reading = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reading);
    }

    #[test]
    fn test_metric_serializes_as_wire_name() {
        assert_eq!(
            serde_json::to_string(&Metric::Benzene).unwrap(),
            "\"benzenePpm\""
        );
        let back: Metric = serde_json::from_str("\"co2Ppm\"").unwrap();
        assert_eq!(back, Metric::Co2);
    }

    #[test]
    fn test_bucket_serializes_metric_keys_as_strings() {
        let mut values = std::collections::BTreeMap::new();
        values.insert(Metric::Co2, 750.0);
        values.insert(Metric::Co, 2.5);
        let bucket = AggregatedBucket {
            label: "10:00".to_string(),
            values,
        };

        let json = serde_json::to_string(&bucket).unwrap();
        assert!(json.contains("\"label\":\"10:00\""));
        assert!(json.contains("\"co2Ppm\":750.0"));
        assert!(json.contains("\"coPpm\":2.5"));
    }

    #[test]
    fn test_series_serializes_untagged() {
        let raw = AggregatedSeries::Raw(vec![sample_reading()]);
        let json = serde_json::to_string(&raw).unwrap();
        // Raw series is a plain array of readings, no enum wrapper.
        assert!(json.starts_with("[{"));
        assert!(json.contains("\"co2Ppm\""));

        let buckets = AggregatedSeries::Buckets(vec![]);
        assert_eq!(serde_json::to_string(&buckets).unwrap(), "[]");
    }
}
