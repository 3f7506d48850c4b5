//! Windowed filtering and time-bucketed aggregation of sensor readings.
//!
//! Every function in this module is a pure, synchronous transform over an
//! immutable snapshot of fetched readings. The surrounding application
//! re-runs the full pipeline (fetch → filter → aggregate → classify)
//! whenever the selected day, time range, metric selection, or fetched data
//! changes; nothing here holds state between invocations.
//!
//! # Example
//!
//! ```
//! use airdash_core::aggregate::{aggregate_by_interval, most_recent, window_readings};
//! use airdash_types::{MetricSelection, Reading, TimeWindow};
//!
//! let day = time::Date::from_calendar_date(2026, time::Month::March, 5).unwrap();
//! let readings: Vec<Reading> = vec![];
//!
//! let window = TimeWindow::full_day(day);
//! let windowed = window_readings(&readings, &window);
//! let series = aggregate_by_interval(&windowed, &window, &MetricSelection::all());
//! assert!(series.is_empty());
//! assert!(most_recent(&readings).is_none());
//! ```

use std::collections::BTreeMap;

use airdash_types::{AggregatedBucket, AggregatedSeries, MetricSelection, Reading, TimeWindow};

/// Windows of this length or shorter are passed through without bucketing.
pub const RAW_WINDOW_MAX_MINUTES: u16 = 30;

/// Select the readings inside a day/time-of-day window.
///
/// A reading is inside the window when its timestamp falls on the window's
/// calendar day and its time of day lies within the window's minute range,
/// inclusive of both ends. Input order is preserved; no side effects.
///
/// An empty window (`start == end`) still matches readings at exactly that
/// instant. An inverted window matches nothing.
#[must_use]
pub fn window_readings(all: &[Reading], window: &TimeWindow) -> Vec<Reading> {
    all.iter()
        .filter(|r| window.contains(r.timestamp))
        .cloned()
        .collect()
}

/// The reading with the maximum timestamp across the *entire* list.
///
/// Deliberately scoped to the unfiltered dataset rather than any window:
/// the "latest reading" panel always reflects the newest sample the API has,
/// regardless of which day the user is looking at.
///
/// Returns `None` for an empty list. Callers must treat `None` distinctly
/// from any real reading (render an "unknown" state, never zeros). The
/// result is independent of input order.
#[must_use]
pub fn most_recent(all: &[Reading]) -> Option<&Reading> {
    all.iter().max_by_key(|r| r.timestamp)
}

/// Bucket width for a window of the given length, in minutes.
///
/// Wider windows get coarser buckets so a chart stays readable:
/// over 12 hours → hourly, over 4 hours → half-hourly, over 1 hour →
/// 10 minutes, otherwise per-minute.
#[must_use]
pub fn bucket_width_minutes(window_minutes: u16) -> u16 {
    if window_minutes > 12 * 60 {
        60
    } else if window_minutes > 4 * 60 {
        30
    } else if window_minutes > 60 {
        10
    } else {
        1
    }
}

/// Average a windowed reading list into time buckets.
///
/// `windowed` is expected to be the output of [`window_readings`] for the
/// same `window`; readings are assigned to buckets by time of day only.
///
/// Windows of [`RAW_WINDOW_MAX_MINUTES`] or less return the readings
/// unchanged ([`AggregatedSeries::Raw`]) with no averaging and no
/// relabelling. Longer windows produce [`AggregatedSeries::Buckets`]:
///
/// - buckets are anchored at the window start, truncated to the start of
///   the containing hour for hourly buckets (to the minute otherwise), and
///   advance by the bucket width until the window end;
/// - each bucket covers `[start, start + width)` — exclusive upper bound;
/// - buckets with no readings are skipped, so the output series is sparse
///   rather than uniformly spaced;
/// - each emitted bucket holds the arithmetic mean per *selected* metric;
///   unselected metrics are absent from the bucket. With no metrics
///   selected no buckets are emitted at all.
///
/// A NaN metric value poisons the mean of the bucket it lands in; values
/// are propagated as delivered, not sanitized.
#[must_use]
pub fn aggregate_by_interval(
    windowed: &[Reading],
    window: &TimeWindow,
    selection: &MetricSelection,
) -> AggregatedSeries {
    let span = window.duration_minutes();
    if span <= RAW_WINDOW_MAX_MINUTES {
        return AggregatedSeries::Raw(windowed.to_vec());
    }

    let mut buckets = Vec::new();
    if !selection.any() {
        return AggregatedSeries::Buckets(buckets);
    }

    let width = bucket_width_minutes(span);
    let metrics = selection.selected();

    // Hourly buckets align to the hour grid; finer buckets start at the
    // window's own minute.
    let mut bucket_start = if width >= 60 {
        (window.start_minute / 60) * 60
    } else {
        window.start_minute
    };

    while bucket_start < window.end_minute {
        let bucket_end = u32::from(bucket_start) + u32::from(width);

        let members: Vec<&Reading> = windowed
            .iter()
            .filter(|r| {
                let minute = minute_of_day(r.timestamp);
                minute >= u32::from(bucket_start) && minute < bucket_end
            })
            .collect();

        if !members.is_empty() {
            let mut values = BTreeMap::new();
            for metric in &metrics {
                let sum: f64 = members.iter().map(|r| r.metric(*metric)).sum();
                values.insert(*metric, sum / members.len() as f64);
            }
            buckets.push(AggregatedBucket {
                label: bucket_label(bucket_start, width),
                values,
            });
        }

        bucket_start = match bucket_start.checked_add(width) {
            Some(next) => next,
            None => break,
        };
    }

    AggregatedSeries::Buckets(buckets)
}

/// Minute offset from midnight of a timestamp, in its own time zone.
fn minute_of_day(timestamp: time::OffsetDateTime) -> u32 {
    let t = timestamp.time();
    u32::from(t.hour()) * 60 + u32::from(t.minute())
}

/// Bucket label: `HH:00` for hourly buckets, `HH:mm` for finer ones.
fn bucket_label(start_minute: u16, width: u16) -> String {
    if width >= 60 {
        format!("{:02}:00", start_minute / 60)
    } else {
        format!("{:02}:{:02}", start_minute / 60, start_minute % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airdash_types::Metric;
    use time::{Date, Month, OffsetDateTime};

    fn day() -> Date {
        Date::from_calendar_date(2026, Month::March, 5).unwrap()
    }

    fn reading_at(hour: u8, minute: u8, co2: f64) -> Reading {
        Reading::builder()
            .timestamp(day().with_hms(hour, minute, 0).unwrap().assume_utc())
            .co2_ppm(co2)
            .build()
    }

    #[test]
    fn test_window_readings_filters_by_day_and_time() {
        let other_day = Date::from_calendar_date(2026, Month::March, 6)
            .unwrap()
            .with_hms(9, 30, 0)
            .unwrap()
            .assume_utc();

        let readings = vec![
            reading_at(8, 59, 400.0),
            reading_at(9, 0, 500.0),
            reading_at(9, 30, 600.0),
            reading_at(10, 0, 700.0),
            reading_at(10, 1, 800.0),
            Reading::builder().timestamp(other_day).co2_ppm(900.0).build(),
        ];

        let window = TimeWindow::new(day(), 540, 600); // 09:00-10:00
        let windowed = window_readings(&readings, &window);

        // Every returned reading satisfies the predicate, every excluded
        // one violates it.
        assert_eq!(windowed.len(), 3);
        assert!(windowed.iter().all(|r| window.contains(r.timestamp)));
        assert_eq!(
            readings.iter().filter(|r| window.contains(r.timestamp)).count(),
            windowed.len()
        );
    }

    #[test]
    fn test_window_readings_preserves_order() {
        // Deliberately unsorted input.
        let readings = vec![
            reading_at(12, 30, 1.0),
            reading_at(12, 5, 2.0),
            reading_at(12, 50, 3.0),
        ];
        let window = TimeWindow::new(day(), 720, 780);

        let windowed = window_readings(&readings, &window);
        let values: Vec<f64> = windowed.iter().map(|r| r.co2_ppm).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_window_readings_empty_input() {
        let window = TimeWindow::full_day(day());
        assert!(window_readings(&[], &window).is_empty());
    }

    #[test]
    fn test_most_recent_empty_is_none() {
        assert!(most_recent(&[]).is_none());
    }

    #[test]
    fn test_most_recent_ignores_order() {
        let readings = vec![
            reading_at(14, 0, 1.0),
            reading_at(9, 0, 2.0),
            reading_at(23, 59, 3.0),
            reading_at(18, 30, 4.0),
        ];
        assert_eq!(most_recent(&readings).unwrap().co2_ppm, 3.0);
    }

    #[test]
    fn test_most_recent_spans_whole_dataset_not_window() {
        // The latest reading lives outside any plausible display window;
        // most_recent must still find it.
        let next_day = Date::from_calendar_date(2026, Month::March, 6)
            .unwrap()
            .with_hms(0, 5, 0)
            .unwrap()
            .assume_utc();
        let readings = vec![
            reading_at(12, 0, 1.0),
            Reading::builder().timestamp(next_day).co2_ppm(2.0).build(),
        ];
        assert_eq!(most_recent(&readings).unwrap().co2_ppm, 2.0);
    }

    #[test]
    fn test_bucket_width_thresholds() {
        assert_eq!(bucket_width_minutes(1439), 60);
        assert_eq!(bucket_width_minutes(721), 60);
        assert_eq!(bucket_width_minutes(720), 30);
        assert_eq!(bucket_width_minutes(300), 30);
        assert_eq!(bucket_width_minutes(241), 30);
        assert_eq!(bucket_width_minutes(240), 10);
        assert_eq!(bucket_width_minutes(61), 10);
        assert_eq!(bucket_width_minutes(60), 1);
        assert_eq!(bucket_width_minutes(31), 1);
    }

    #[test]
    fn test_short_window_passes_readings_through() {
        let readings = vec![reading_at(10, 5, 500.0), reading_at(10, 15, 700.0)];
        let window = TimeWindow::new(day(), 600, 620); // 20 minutes

        let series = aggregate_by_interval(&readings, &window, &MetricSelection::all());
        assert_eq!(series, AggregatedSeries::Raw(readings));
    }

    #[test]
    fn test_five_hour_window_uses_half_hour_buckets() {
        // 08:00-13:00, readings only in two of the ten possible buckets.
        let readings = vec![
            reading_at(8, 10, 400.0),
            reading_at(8, 20, 600.0),
            reading_at(11, 45, 900.0),
        ];
        let window = TimeWindow::new(day(), 480, 780);

        let series = aggregate_by_interval(&readings, &window, &MetricSelection::all());
        let AggregatedSeries::Buckets(buckets) = series else {
            panic!("expected bucketed series");
        };

        // Empty buckets are skipped: sparse output, not ten evenly spaced rows.
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "08:00");
        assert_eq!(buckets[0].value(Metric::Co2), Some(500.0));
        assert_eq!(buckets[1].label, "11:30");
        assert_eq!(buckets[1].value(Metric::Co2), Some(900.0));
    }

    #[test]
    fn test_long_window_uses_hourly_buckets_with_hour_labels() {
        let readings = vec![
            reading_at(9, 40, 300.0),
            reading_at(9, 50, 500.0),
            reading_at(10, 10, 800.0),
        ];
        // 09:30-23:00 is over 12 hours, so hourly buckets anchored to 09:00.
        let window = TimeWindow::new(day(), 570, 1380);

        let series = aggregate_by_interval(&readings, &window, &MetricSelection::all());
        let AggregatedSeries::Buckets(buckets) = series else {
            panic!("expected bucketed series");
        };

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "09:00");
        assert_eq!(buckets[0].value(Metric::Co2), Some(400.0));
        assert_eq!(buckets[1].label, "10:00");
        assert_eq!(buckets[1].value(Metric::Co2), Some(800.0));
    }

    #[test]
    fn test_unselected_metrics_omitted_from_buckets() {
        let readings = vec![
            Reading::builder()
                .timestamp(day().with_hms(8, 10, 0).unwrap().assume_utc())
                .co2_ppm(500.0)
                .nh3_ppm(10.0)
                .build(),
        ];
        let window = TimeWindow::new(day(), 480, 780);
        let selection = MetricSelection::from_metrics(&[Metric::Nh3]);

        let series = aggregate_by_interval(&readings, &window, &selection);
        let AggregatedSeries::Buckets(buckets) = series else {
            panic!("expected bucketed series");
        };

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].value(Metric::Nh3), Some(10.0));
        assert_eq!(buckets[0].value(Metric::Co2), None);
    }

    #[test]
    fn test_empty_selection_emits_no_buckets() {
        let readings = vec![reading_at(8, 10, 500.0)];
        let window = TimeWindow::new(day(), 480, 780);

        let series = aggregate_by_interval(&readings, &window, &MetricSelection::none());
        assert_eq!(series, AggregatedSeries::Buckets(vec![]));
    }

    #[test]
    fn test_nan_poisons_bucket_mean() {
        let readings = vec![reading_at(8, 10, f64::NAN), reading_at(8, 20, 600.0)];
        let window = TimeWindow::new(day(), 480, 780);

        let series = aggregate_by_interval(&readings, &window, &MetricSelection::all());
        let AggregatedSeries::Buckets(buckets) = series else {
            panic!("expected bucketed series");
        };
        assert!(buckets[0].value(Metric::Co2).unwrap().is_nan());
    }

    #[test]
    fn test_full_day_window_bucket_count_bound() {
        let readings: Vec<Reading> = (0..24)
            .map(|hour| reading_at(hour, 30, f64::from(hour) * 10.0))
            .collect();
        let window = TimeWindow::full_day(day());

        let series = aggregate_by_interval(&readings, &window, &MetricSelection::all());
        let AggregatedSeries::Buckets(buckets) = series else {
            panic!("expected bucketed series");
        };

        // One reading per hour, hourly buckets: exactly 24, labels on the hour.
        assert_eq!(buckets.len(), 24);
        assert_eq!(buckets[0].label, "00:00");
        assert_eq!(buckets[23].label, "23:00");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// most_recent returns the maximum timestamp no matter how the
            /// input is ordered.
            #[test]
            fn most_recent_is_max_under_shuffling(
                seconds in proptest::collection::vec(0i64..=2_000_000_000, 1..40).prop_shuffle()
            ) {
                let readings: Vec<Reading> = seconds
                    .iter()
                    .map(|&s| {
                        Reading::builder()
                            .timestamp(OffsetDateTime::from_unix_timestamp(s).unwrap())
                            .build()
                    })
                    .collect();

                let max = readings.iter().map(|r| r.timestamp).max().unwrap();
                prop_assert_eq!(most_recent(&readings).unwrap().timestamp, max);
            }

            /// Windowing never invents readings and never keeps one that
            /// fails the predicate.
            #[test]
            fn windowing_is_a_pure_filter(
                minutes in proptest::collection::vec(0u32..=1439, 0..60),
                start in 0u16..=1439,
                end in 0u16..=1439,
            ) {
                let readings: Vec<Reading> = minutes
                    .iter()
                    .map(|&m| {
                        let ts = Date::from_calendar_date(2026, Month::March, 5)
                            .unwrap()
                            .with_hms((m / 60) as u8, (m % 60) as u8, 0)
                            .unwrap()
                            .assume_utc();
                        Reading::builder().timestamp(ts).build()
                    })
                    .collect();

                let window = TimeWindow::new(
                    Date::from_calendar_date(2026, Month::March, 5).unwrap(),
                    start,
                    end,
                );
                let windowed = window_readings(&readings, &window);

                prop_assert!(windowed.iter().all(|r| window.contains(r.timestamp)));
                let expected = readings
                    .iter()
                    .filter(|r| window.contains(r.timestamp))
                    .count();
                prop_assert_eq!(windowed.len(), expected);
            }
        }
    }
}
