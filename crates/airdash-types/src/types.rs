//! Core types for airdash sensor data.

use core::fmt;
use std::collections::BTreeMap;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Highest valid minute offset within a calendar day (23:59).
pub const MAX_MINUTE: u16 = 1439;

/// One of the five gas concentration metrics reported by the station.
///
/// Temperature and humidity are part of every [`Reading`] but are not
/// `Metric`s: thresholds, selections, and aggregated buckets only ever
/// apply to the concentration channels.
///
/// # Examples
///
/// ```
/// use airdash_types::Metric;
///
/// assert_eq!(Metric::Co2.wire_name(), "co2Ppm");
/// assert_eq!("benzene".parse::<Metric>(), Ok(Metric::Benzene));
/// assert_eq!(Metric::ALL.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Metric {
    /// Carbon dioxide concentration (ppm).
    #[cfg_attr(feature = "serde", serde(rename = "co2Ppm"))]
    Co2,
    /// Ammonia concentration (ppm).
    #[cfg_attr(feature = "serde", serde(rename = "nh3Ppm"))]
    Nh3,
    /// Benzene concentration (ppm).
    #[cfg_attr(feature = "serde", serde(rename = "benzenePpm"))]
    Benzene,
    /// Liquefied petroleum gas concentration (ppm).
    #[cfg_attr(feature = "serde", serde(rename = "lpgPpm"))]
    Lpg,
    /// Carbon monoxide concentration (ppm).
    #[cfg_attr(feature = "serde", serde(rename = "coPpm"))]
    Co,
}

impl Metric {
    /// All five metrics, in wire order.
    pub const ALL: [Metric; 5] = [
        Metric::Co2,
        Metric::Nh3,
        Metric::Benzene,
        Metric::Lpg,
        Metric::Co,
    ];

    /// The JSON field name used by the HTTP API.
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            Metric::Co2 => "co2Ppm",
            Metric::Nh3 => "nh3Ppm",
            Metric::Benzene => "benzenePpm",
            Metric::Lpg => "lpgPpm",
            Metric::Co => "coPpm",
        }
    }

    /// Short display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Co2 => "CO2",
            Metric::Nh3 => "NH3",
            Metric::Benzene => "Benzene",
            Metric::Lpg => "LPG",
            Metric::Co => "CO",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = ParseError;

    /// Parse a metric from its short name (case-insensitive).
    ///
    /// Accepts both the short names (`co2`, `nh3`, `benzene`, `lpg`, `co`)
    /// and the wire names (`co2Ppm`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "co2" | "co2ppm" => Ok(Metric::Co2),
            "nh3" | "nh3ppm" => Ok(Metric::Nh3),
            "benzene" | "benzeneppm" => Ok(Metric::Benzene),
            "lpg" | "lpgppm" => Ok(Metric::Lpg),
            "co" | "coppm" => Ok(Metric::Co),
            other => Err(ParseError::InvalidValue(format!(
                "unknown metric '{}' (expected co2, nh3, benzene, lpg, or co)",
                other
            ))),
        }
    }
}

/// One sensor sample as served by the HTTP API.
///
/// The wire format is camelCase JSON with an RFC 3339 timestamp:
///
/// ```json
/// {"id": 17, "timestamp": "2026-03-05T09:12:00Z", "temperature": 21.4,
///  "humidity": 38.0, "co2Ppm": 720.0, "nh3Ppm": 12.0, "benzenePpm": 0.03,
///  "lpgPpm": 410.0, "coPpm": 2.1}
/// ```
///
/// Metric fields are always present and numeric in data this crate consumes;
/// upstream values are not validated or sanitized here. A NaN delivered by
/// the API propagates unchanged through averages and threshold comparisons.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Reading {
    /// Opaque identifier, unique per reading. No semantic role.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: i64,
    /// When the sample was taken.
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub timestamp: time::OffsetDateTime,
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Relative humidity percentage.
    pub humidity: f64,
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

impl Default for Reading {
    fn default() -> Self {
        Self {
            id: 0,
            timestamp: time::OffsetDateTime::UNIX_EPOCH,
            temperature: 0.0,
            humidity: 0.0,
            co2_ppm: 0.0,
            nh3_ppm: 0.0,
            benzene_ppm: 0.0,
            lpg_ppm: 0.0,
            co_ppm: 0.0,
        }
    }
}

impl Reading {
    /// Get the value of a concentration metric.
    #[must_use]
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Co2 => self.co2_ppm,
            Metric::Nh3 => self.nh3_ppm,
            Metric::Benzene => self.benzene_ppm,
            Metric::Lpg => self.lpg_ppm,
            Metric::Co => self.co_ppm,
        }
    }

    /// Create a builder for constructing a `Reading`.
    pub fn builder() -> ReadingBuilder {
        ReadingBuilder::default()
    }
}

/// Builder for constructing [`Reading`] values, mainly useful in tests
/// and when submitting new samples.
#[derive(Debug, Default)]
#[must_use]
pub struct ReadingBuilder {
    reading: Reading,
}

impl ReadingBuilder {
    /// Set the opaque identifier.
    pub fn id(mut self, id: i64) -> Self {
        self.reading.id = id;
        self
    }

    /// Set the timestamp.
    pub fn timestamp(mut self, timestamp: time::OffsetDateTime) -> Self {
        self.reading.timestamp = timestamp;
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.reading.temperature = temperature;
        self
    }

    /// Set relative humidity.
    pub fn humidity(mut self, humidity: f64) -> Self {
        self.reading.humidity = humidity;
        self
    }

    /// Set CO2 concentration.
    pub fn co2_ppm(mut self, ppm: f64) -> Self {
        self.reading.co2_ppm = ppm;
        self
    }

    /// Set NH3 concentration.
    pub fn nh3_ppm(mut self, ppm: f64) -> Self {
        self.reading.nh3_ppm = ppm;
        self
    }

    /// Set benzene concentration.
    pub fn benzene_ppm(mut self, ppm: f64) -> Self {
        self.reading.benzene_ppm = ppm;
        self
    }

    /// Set LPG concentration.
    pub fn lpg_ppm(mut self, ppm: f64) -> Self {
        self.reading.lpg_ppm = ppm;
        self
    }

    /// Set CO concentration.
    pub fn co_ppm(mut self, ppm: f64) -> Self {
        self.reading.co_ppm = ppm;
        self
    }

    /// Set a concentration metric by name.
    pub fn metric(mut self, metric: Metric, ppm: f64) -> Self {
        match metric {
            Metric::Co2 => self.reading.co2_ppm = ppm,
            Metric::Nh3 => self.reading.nh3_ppm = ppm,
            Metric::Benzene => self.reading.benzene_ppm = ppm,
            Metric::Lpg => self.reading.lpg_ppm = ppm,
            Metric::Co => self.reading.co_ppm = ppm,
        }
        self
    }

    /// Build the `Reading`.
    #[must_use]
    pub fn build(self) -> Reading {
        self.reading
    }
}

/// A time-of-day window within a single calendar day.
///
/// `start_minute` and `end_minute` are minute offsets from midnight in
/// `[0, 1439]`. The window is inclusive of both ends at instant precision:
/// a reading at exactly `end_minute:00` is inside, one at `end_minute:30`
/// (thirty seconds later) is outside.
///
/// Callers are expected to keep `start_minute <= end_minute`; the inverted
/// case is not rejected, it simply selects nothing by construction of the
/// interval check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeWindow {
    /// The calendar day the window applies to.
    pub day: time::Date,
    /// First minute of the window (offset from midnight).
    pub start_minute: u16,
    /// Last minute of the window (offset from midnight).
    pub end_minute: u16,
}

impl TimeWindow {
    /// Create a window without range validation.
    #[must_use]
    pub fn new(day: time::Date, start_minute: u16, end_minute: u16) -> Self {
        Self {
            day,
            start_minute,
            end_minute,
        }
    }

    /// Create a window, rejecting minute offsets outside `[0, 1439]`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidValue`] if either offset exceeds
    /// [`MAX_MINUTE`].
    pub fn try_new(day: time::Date, start_minute: u16, end_minute: u16) -> Result<Self, ParseError> {
        for (name, value) in [("start", start_minute), ("end", end_minute)] {
            if value > MAX_MINUTE {
                return Err(ParseError::InvalidValue(format!(
                    "{} minute {} exceeds maximum of {}",
                    name, value, MAX_MINUTE
                )));
            }
        }
        Ok(Self::new(day, start_minute, end_minute))
    }

    /// The full-day window `00:00`..`23:59` for the given day.
    #[must_use]
    pub fn full_day(day: time::Date) -> Self {
        Self::new(day, 0, MAX_MINUTE)
    }

    /// Window length in minutes. Zero for inverted windows.
    #[must_use]
    pub fn duration_minutes(&self) -> u16 {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// Whether a timestamp falls on this window's day and inside its
    /// time-of-day interval (inclusive of both ends).
    #[must_use]
    pub fn contains(&self, timestamp: time::OffsetDateTime) -> bool {
        if timestamp.date() != self.day {
            return false;
        }
        let t = timestamp.time();
        let second_of_day =
            u32::from(t.hour()) * 3600 + u32::from(t.minute()) * 60 + u32::from(t.second());
        let start = u32::from(self.start_minute) * 60;
        let end = u32::from(self.end_minute) * 60;
        second_of_day >= start && second_of_day <= end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}-{:02}:{:02}",
            self.day,
            self.start_minute / 60,
            self.start_minute % 60,
            self.end_minute / 60,
            self.end_minute % 60
        )
    }
}

/// Which concentration metrics are enabled for display.
///
/// This is purely a display filter applied after aggregation; it never
/// affects which readings count as critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetricSelection {
    /// Include CO2 in output.
    pub co2: bool,
    /// Include NH3 in output.
    pub nh3: bool,
    /// Include benzene in output.
    pub benzene: bool,
    /// Include LPG in output.
    pub lpg: bool,
    /// Include CO in output.
    pub co: bool,
}

impl Default for MetricSelection {
    /// All five metrics enabled.
    fn default() -> Self {
        Self::all()
    }
}

impl MetricSelection {
    /// Selection with every metric enabled.
    #[must_use]
    pub fn all() -> Self {
        Self {
            co2: true,
            nh3: true,
            benzene: true,
            lpg: true,
            co: true,
        }
    }

    /// Selection with every metric disabled.
    #[must_use]
    pub fn none() -> Self {
        Self {
            co2: false,
            nh3: false,
            benzene: false,
            lpg: false,
            co: false,
        }
    }

    /// Selection enabling exactly the given metrics.
    #[must_use]
    pub fn from_metrics(metrics: &[Metric]) -> Self {
        let mut selection = Self::none();
        for metric in metrics {
            match metric {
                Metric::Co2 => selection.co2 = true,
                Metric::Nh3 => selection.nh3 = true,
                Metric::Benzene => selection.benzene = true,
                Metric::Lpg => selection.lpg = true,
                Metric::Co => selection.co = true,
            }
        }
        selection
    }

    /// Whether a metric is enabled.
    #[must_use]
    pub fn includes(&self, metric: Metric) -> bool {
        match metric {
            Metric::Co2 => self.co2,
            Metric::Nh3 => self.nh3,
            Metric::Benzene => self.benzene,
            Metric::Lpg => self.lpg,
            Metric::Co => self.co,
        }
    }

    /// Whether any metric is enabled.
    #[must_use]
    pub fn any(&self) -> bool {
        Metric::ALL.iter().any(|m| self.includes(*m))
    }

    /// The enabled metrics, in wire order.
    #[must_use]
    pub fn selected(&self) -> Vec<Metric> {
        Metric::ALL
            .iter()
            .copied()
            .filter(|m| self.includes(*m))
            .collect()
    }
}

/// One averaged time bucket in an aggregated series.
///
/// `values` holds the arithmetic mean per enabled metric; disabled metrics
/// are absent. Recomputed on every aggregation pass, never stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AggregatedBucket {
    /// Formatted time label (`HH:00` for hourly buckets, otherwise `HH:mm`).
    pub label: String,
    /// Mean concentration per enabled metric.
    pub values: BTreeMap<Metric, f64>,
}

impl AggregatedBucket {
    /// Mean value of a metric, if the metric was enabled.
    #[must_use]
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }
}

/// Output of windowed aggregation.
///
/// Short windows (30 minutes or less) pass the raw readings through
/// untouched; longer windows average into [`AggregatedBucket`]s.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AggregatedSeries {
    /// Raw readings, unchanged from the windowed input.
    Raw(Vec<Reading>),
    /// Averaged buckets, sparse (empty buckets are skipped).
    Buckets(Vec<AggregatedBucket>),
}

impl AggregatedSeries {
    /// Number of points in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            AggregatedSeries::Raw(readings) => readings.len(),
            AggregatedSeries::Buckets(buckets) => buckets.len(),
        }
    }

    /// Whether the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Date;
    use time::Month;

    fn day() -> Date {
        Date::from_calendar_date(2026, Month::March, 5).unwrap()
    }

    fn at(hour: u8, minute: u8, second: u8) -> time::OffsetDateTime {
        day()
            .with_hms(hour, minute, second)
            .unwrap()
            .assume_utc()
    }

    #[test]
    fn test_metric_wire_names() {
        assert_eq!(Metric::Co2.wire_name(), "co2Ppm");
        assert_eq!(Metric::Nh3.wire_name(), "nh3Ppm");
        assert_eq!(Metric::Benzene.wire_name(), "benzenePpm");
        assert_eq!(Metric::Lpg.wire_name(), "lpgPpm");
        assert_eq!(Metric::Co.wire_name(), "coPpm");
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("co2".parse::<Metric>().unwrap(), Metric::Co2);
        assert_eq!("CO2".parse::<Metric>().unwrap(), Metric::Co2);
        assert_eq!("benzenePpm".parse::<Metric>().unwrap(), Metric::Benzene);
        assert!("pm25".parse::<Metric>().is_err());
    }

    #[test]
    fn test_reading_metric_accessor() {
        let reading = Reading::builder()
            .co2_ppm(800.0)
            .nh3_ppm(12.0)
            .benzene_ppm(0.05)
            .lpg_ppm(300.0)
            .co_ppm(3.0)
            .build();

        assert_eq!(reading.metric(Metric::Co2), 800.0);
        assert_eq!(reading.metric(Metric::Nh3), 12.0);
        assert_eq!(reading.metric(Metric::Benzene), 0.05);
        assert_eq!(reading.metric(Metric::Lpg), 300.0);
        assert_eq!(reading.metric(Metric::Co), 3.0);
    }

    #[test]
    fn test_builder_metric_by_name() {
        let reading = Reading::builder().metric(Metric::Lpg, 1200.0).build();
        assert_eq!(reading.lpg_ppm, 1200.0);
        assert_eq!(reading.co2_ppm, 0.0);
    }

    #[test]
    fn test_window_contains_inclusive_bounds() {
        let window = TimeWindow::new(day(), 540, 600); // 09:00-10:00

        assert!(window.contains(at(9, 0, 0)));
        assert!(window.contains(at(9, 30, 15)));
        assert!(window.contains(at(10, 0, 0)));
        // Thirty seconds past the end minute boundary is outside.
        assert!(!window.contains(at(10, 0, 30)));
        assert!(!window.contains(at(8, 59, 59)));
    }

    #[test]
    fn test_window_rejects_other_days() {
        let window = TimeWindow::full_day(day());
        let other_day = Date::from_calendar_date(2026, Month::March, 6)
            .unwrap()
            .with_hms(12, 0, 0)
            .unwrap()
            .assume_utc();
        assert!(!window.contains(other_day));
    }

    #[test]
    fn test_empty_window_matches_exact_instant() {
        let window = TimeWindow::new(day(), 600, 600);
        assert!(window.contains(at(10, 0, 0)));
        assert!(!window.contains(at(10, 0, 1)));
        assert!(!window.contains(at(9, 59, 59)));
    }

    #[test]
    fn test_inverted_window_selects_nothing() {
        let window = TimeWindow::new(day(), 600, 540);
        assert!(!window.contains(at(9, 30, 0)));
        assert!(!window.contains(at(10, 30, 0)));
        assert_eq!(window.duration_minutes(), 0);
    }

    #[test]
    fn test_try_new_rejects_out_of_range_minutes() {
        assert!(TimeWindow::try_new(day(), 0, 1440).is_err());
        assert!(TimeWindow::try_new(day(), 2000, 100).is_err());
        assert!(TimeWindow::try_new(day(), 0, MAX_MINUTE).is_ok());
    }

    #[test]
    fn test_window_display() {
        let window = TimeWindow::new(day(), 75, 1439);
        assert_eq!(window.to_string(), "2026-03-05 01:15-23:59");
    }

    #[test]
    fn test_selection_defaults_to_all() {
        let selection = MetricSelection::default();
        assert!(selection.any());
        assert_eq!(selection.selected(), Metric::ALL.to_vec());
    }

    #[test]
    fn test_selection_from_metrics() {
        let selection = MetricSelection::from_metrics(&[Metric::Co2, Metric::Co]);
        assert!(selection.includes(Metric::Co2));
        assert!(selection.includes(Metric::Co));
        assert!(!selection.includes(Metric::Nh3));
        assert_eq!(selection.selected(), vec![Metric::Co2, Metric::Co]);
    }

    #[test]
    fn test_selection_none() {
        let selection = MetricSelection::none();
        assert!(!selection.any());
        assert!(selection.selected().is_empty());
    }

    #[test]
    fn test_bucket_value_lookup() {
        let mut values = BTreeMap::new();
        values.insert(Metric::Co2, 812.5);
        let bucket = AggregatedBucket {
            label: "09:00".to_string(),
            values,
        };

        assert_eq!(bucket.value(Metric::Co2), Some(812.5));
        assert_eq!(bucket.value(Metric::Nh3), None);
    }

    #[test]
    fn test_series_len() {
        let raw = AggregatedSeries::Raw(vec![Reading::default()]);
        assert_eq!(raw.len(), 1);
        assert!(!raw.is_empty());

        let buckets = AggregatedSeries::Buckets(vec![]);
        assert!(buckets.is_empty());
    }
}
