//! Correlation aggregator
//!
//! Joins condition-matching weather days against detections uploaded on
//! those days and ranks the per-condition results by disease rate.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use shared::{ConditionResult, DetectionRecord, SampleSize, WeatherObservation};

use crate::engine::classifier::{Condition, CONDITIONS};

/// Compute one ranked result per classifier condition.
///
/// The sort is stable, so conditions with equal disease rates keep the
/// classifier table's relative order.
pub fn aggregate(
    weather: &[WeatherObservation],
    detections: &[DetectionRecord],
) -> Vec<ConditionResult> {
    let mut results: Vec<ConditionResult> = CONDITIONS
        .iter()
        .map(|condition| correlate(condition, weather, detections))
        .collect();

    results.sort_by(|a, b| b.disease_rate.cmp(&a.disease_rate));
    results
}

fn correlate(
    condition: &Condition,
    weather: &[WeatherObservation],
    detections: &[DetectionRecord],
) -> ConditionResult {
    // Multiple same-day observations collapse to one weather-day
    let matching_days: BTreeSet<NaiveDate> = weather
        .iter()
        .filter(|obs| (condition.matches)(obs))
        .map(|obs| obs.observation_date())
        .collect();

    if matching_days.is_empty() {
        return ConditionResult {
            condition: condition.name.to_string(),
            threshold: condition.threshold.to_string(),
            weather_days: 0,
            bad_count: 0,
            good_count: 0,
            total: 0,
            disease_rate: 0,
            sample_size: SampleSize::NoData,
        };
    }

    let mut bad_count = 0u32;
    let mut good_count = 0u32;
    for detection in detections {
        if !matching_days.contains(&detection.detection_date()) {
            continue;
        }
        if detection.is_bad() {
            bad_count += 1;
        } else if detection.is_good() {
            good_count += 1;
        }
        // Detections with any other label are excluded from all counts
    }

    let total = bad_count + good_count;
    let disease_rate = if total > 0 {
        (f64::from(bad_count) * 100.0 / f64::from(total)).round() as u32
    } else {
        0
    };

    ConditionResult {
        condition: condition.name.to_string(),
        threshold: condition.threshold.to_string(),
        weather_days: matching_days.len() as u32,
        bad_count,
        good_count,
        total,
        disease_rate,
        sample_size: SampleSize::Count(total),
    }
}
