//! Exceedance thresholds and air-quality classification.
//!
//! This module provides the fixed per-metric thresholds for flagging
//! critical readings and the tiered classification of overall air quality
//! from the most recent sample.
//!
//! # Example
//!
//! ```
//! use airdash_core::{AirQuality, ThresholdSet, classify_air_quality};
//! use airdash_types::Reading;
//!
//! let thresholds = ThresholdSet::default();
//! let reading = Reading::builder().co2_ppm(1500.0).build();
//!
//! let quality = classify_air_quality(Some(&reading), &thresholds);
//! assert_eq!(quality, AirQuality::Moderate);
//! println!("{}", quality.description());
//! ```

use serde::{Deserialize, Serialize};

use airdash_types::{Metric, Reading};

/// Per-metric exceedance boundaries in ppm.
///
/// A reading is critical when at least one metric is *strictly* above its
/// boundary; a value exactly at the boundary is not an exceedance.
///
/// The defaults are the station's fixed limits and are never mutated at
/// runtime; custom sets exist for tests and for stations with different
/// calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    /// CO2 boundary in ppm.
    pub co2_ppm: f64,
    /// NH3 boundary in ppm.
    pub nh3_ppm: f64,
    /// Benzene boundary in ppm.
    pub benzene_ppm: f64,
    /// LPG boundary in ppm.
    pub lpg_ppm: f64,
    /// CO boundary in ppm.
    pub co_ppm: f64,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            co2_ppm: 1000.0,
            nh3_ppm: 50.0,
            benzene_ppm: 0.1,
            lpg_ppm: 1000.0,
            co_ppm: 9.0,
        }
    }
}

impl ThresholdSet {
    /// The boundary for a metric.
    #[must_use]
    pub fn limit(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Co2 => self.co2_ppm,
            Metric::Nh3 => self.nh3_ppm,
            Metric::Benzene => self.benzene_ppm,
            Metric::Lpg => self.lpg_ppm,
            Metric::Co => self.co_ppm,
        }
    }

    /// Whether a reading strictly exceeds the boundary for one metric.
    ///
    /// NaN values never exceed (the comparison is false), matching the
    /// propagate-unchanged policy for malformed upstream data.
    #[must_use]
    pub fn exceeds(&self, reading: &Reading, metric: Metric) -> bool {
        reading.metric(metric) > self.limit(metric)
    }

    /// The metrics a reading exceeds, in wire order.
    #[must_use]
    pub fn exceeded_metrics(&self, reading: &Reading) -> Vec<Metric> {
        Metric::ALL
            .iter()
            .copied()
            .filter(|m| self.exceeds(reading, *m))
            .collect()
    }

    /// How many of the five metrics a reading exceeds.
    #[must_use]
    pub fn exceedance_count(&self, reading: &Reading) -> usize {
        Metric::ALL
            .iter()
            .filter(|m| self.exceeds(reading, **m))
            .count()
    }

    /// Whether at least one metric exceeds its boundary.
    #[must_use]
    pub fn is_critical(&self, reading: &Reading) -> bool {
        Metric::ALL.iter().any(|m| self.exceeds(reading, *m))
    }
}

/// Overall air-quality tier derived from the most recent reading.
///
/// # Ordering
///
/// Tiers are ordered by severity: `Unknown < Good < Moderate < Poor`,
/// allowing comparisons like `if quality >= AirQuality::Moderate { warn }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AirQuality {
    /// No reading available.
    Unknown = 0,
    /// No metric exceeds its threshold.
    Good = 1,
    /// One or two metrics exceed their thresholds.
    Moderate = 2,
    /// Three or more metrics exceed their thresholds.
    Poor = 3,
}

impl AirQuality {
    /// Get a human-readable description of the quality tier.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            AirQuality::Unknown => "Unknown - no data available",
            AirQuality::Good => "Good - air quality is safe",
            AirQuality::Moderate => "Moderate - slight risk for sensitive people",
            AirQuality::Poor => "Poor - air quality may be hazardous",
        }
    }
}

impl std::fmt::Display for AirQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AirQuality::Unknown => write!(f, "Unknown"),
            AirQuality::Good => write!(f, "Good"),
            AirQuality::Moderate => write!(f, "Moderate"),
            AirQuality::Poor => write!(f, "Poor"),
        }
    }
}

/// Classify overall air quality from the most recent reading.
///
/// Counts how many metrics exceed their thresholds: zero is [`AirQuality::Good`],
/// one or two is [`AirQuality::Moderate`], three or more is [`AirQuality::Poor`].
/// An absent reading classifies as [`AirQuality::Unknown`], never as a real tier.
#[must_use]
pub fn classify_air_quality(latest: Option<&Reading>, thresholds: &ThresholdSet) -> AirQuality {
    let Some(reading) = latest else {
        return AirQuality::Unknown;
    };

    match thresholds.exceedance_count(reading) {
        0 => AirQuality::Good,
        1 | 2 => AirQuality::Moderate,
        _ => AirQuality::Poor,
    }
}

/// Select every reading with at least one metric strictly above its threshold.
///
/// Scoped to the *entire* unfiltered dataset, not the displayed window, so
/// the critical-events table shows exceedances the user is not currently
/// looking at. Input order is preserved; no severity or time sorting.
#[must_use]
pub fn critical_events(all: &[Reading], thresholds: &ThresholdSet) -> Vec<Reading> {
    all.iter()
        .filter(|r| thresholds.is_critical(r))
        .cloned()
        .collect()
}
