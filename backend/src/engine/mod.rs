//! Weather/pest correlation engine
//!
//! One run is a sequential pipeline: load both time series for the window,
//! classify observations into named conditions, aggregate the detection
//! join per condition, then derive insights. Runs share no mutable state;
//! each operates on its own in-memory snapshot of the loaded data.

pub mod aggregator;
pub mod classifier;
pub mod insights;

use shared::{ConditionResult, DateRange, Insight, OwnerFilter};

use crate::error::AppResult;
use crate::stores::{DetectionStore, WeatherStore};

/// Output of one correlation run, before it is attached to an analysis record
#[derive(Debug, Clone)]
pub struct CorrelationRun {
    pub range: DateRange,
    pub owner_filter: OwnerFilter,
    pub weather_count: u32,
    pub detection_count: u32,
    pub condition_results: Vec<ConditionResult>,
    pub insights: Vec<Insight>,
}

/// Load both series and run the classifier, aggregator, and insight stages.
///
/// The two store reads are independent and issued concurrently; both must
/// complete before classification starts.
pub async fn run_correlation<W, D>(
    weather_store: &W,
    detection_store: &D,
    range: DateRange,
    owner_filter: &OwnerFilter,
) -> AppResult<CorrelationRun>
where
    W: WeatherStore + ?Sized,
    D: DetectionStore + ?Sized,
{
    let (weather, detections) = tokio::try_join!(
        weather_store.query(range),
        detection_store.query(range, owner_filter.as_owner()),
    )?;

    tracing::debug!(
        range = %range,
        weather = weather.len(),
        detections = detections.len(),
        "loaded correlation window"
    );

    let condition_results = aggregator::aggregate(&weather, &detections);
    let insights = insights::generate_insights(&condition_results);

    Ok(CorrelationRun {
        range,
        owner_filter: owner_filter.clone(),
        weather_count: weather.len() as u32,
        detection_count: detections.len() as u32,
        condition_results,
        insights,
    })
}
