//! Analysis record lifecycle tests against in-memory stores

mod common;

use apm_backend::error::AppError;
use apm_backend::services::analysis::{AnalysisService, MetadataUpdate};
use apm_backend::stores::AnalysisStore;
use common::{
    detection, observation, range, MemoryAnalysisStore, MemoryDetectionStore, MemoryWeatherStore,
};
use shared::{InsightKind, OwnerFilter, SampleSize};
use uuid::Uuid;

type MemoryAnalysisService =
    AnalysisService<MemoryWeatherStore, MemoryDetectionStore, MemoryAnalysisStore>;

fn service_with(
    observations: Vec<shared::WeatherObservation>,
    detections: Vec<shared::DetectionRecord>,
) -> (MemoryAnalysisService, MemoryAnalysisStore) {
    let analyses = MemoryAnalysisStore::new();
    let service = AnalysisService::new(
        MemoryWeatherStore::new(observations),
        MemoryDetectionStore::new(detections),
        analyses.clone(),
    );
    (service, analyses)
}

#[tokio::test]
async fn create_persists_a_ranked_snapshot() {
    let (service, analyses) = service_with(
        vec![observation("2024-06-01", 80, 25.0, 0.0, "Clear")],
        vec![detection("2024-06-01", "bad", "analyst@example.com")],
    );

    let record = service
        .create(range("2024-06-01", "2024-06-30"), OwnerFilter::all())
        .await
        .unwrap();

    assert_eq!(record.date_range, "2024-06-01 to 2024-06-30");
    assert_eq!(record.weather_count, 1);
    assert_eq!(record.detection_count, 1);
    assert_eq!(record.owner_filter, "all");
    assert_eq!(record.condition_results.len(), 8);
    assert!(record.updated_at.is_none());
    assert!(record.name.is_none());

    // Spec scenario: the humid day carries the bad detection
    let humid = &record.condition_results[0];
    assert_eq!(humid.condition, "High Humidity (>55%)");
    assert_eq!(humid.weather_days, 1);
    assert_eq!(humid.bad_count, 1);
    assert_eq!(humid.good_count, 0);
    assert_eq!(humid.total, 1);
    assert_eq!(humid.disease_rate, 100);
    assert_eq!(humid.sample_size, SampleSize::Count(1));

    let stored = analyses.get(record.id).await.unwrap().unwrap();
    assert_eq!(stored, record);
}

#[tokio::test]
async fn empty_window_yields_no_data_and_only_the_fallback_insight() {
    let (service, _) = service_with(vec![], vec![]);

    let record = service
        .create(range("2024-06-01", "2024-06-30"), OwnerFilter::all())
        .await
        .unwrap();

    assert_eq!(record.weather_count, 0);
    assert_eq!(record.detection_count, 0);
    for result in &record.condition_results {
        assert_eq!(result.weather_days, 0);
        assert_eq!(result.sample_size, SampleSize::NoData);
    }
    assert_eq!(record.insights.len(), 1);
    assert_eq!(record.insights[0].kind, InsightKind::Info);
}

#[tokio::test]
async fn owner_filter_restricts_detections_to_one_submitter() {
    let (service, _) = service_with(
        vec![observation("2024-06-01", 80, 25.0, 0.0, "Clear")],
        vec![
            detection("2024-06-01", "bad", "a@example.com"),
            detection("2024-06-01", "good", "b@example.com"),
        ],
    );

    let record = service
        .create(
            range("2024-06-01", "2024-06-30"),
            OwnerFilter::from(Some("a@example.com".to_string())),
        )
        .await
        .unwrap();

    assert_eq!(record.detection_count, 1);
    assert_eq!(record.owner_filter, "a@example.com");
    assert_eq!(record.condition_results[0].disease_rate, 100);
}

#[tokio::test]
async fn records_outside_the_window_are_not_loaded() {
    let (service, _) = service_with(
        vec![
            observation("2024-05-31", 80, 25.0, 0.0, "Clear"),
            observation("2024-06-01", 80, 25.0, 0.0, "Clear"),
            observation("2024-07-01", 80, 25.0, 0.0, "Clear"),
        ],
        vec![
            detection("2024-05-31", "bad", "a@example.com"),
            detection("2024-06-30", "bad", "a@example.com"),
        ],
    );

    let record = service
        .create(range("2024-06-01", "2024-06-30"), OwnerFilter::all())
        .await
        .unwrap();

    assert_eq!(record.weather_count, 1);
    assert_eq!(record.detection_count, 1);
}

#[tokio::test]
async fn rerun_preserves_identity_and_annotations_and_sets_updated_at() {
    let (service, _) = service_with(
        vec![observation("2024-06-01", 80, 25.0, 0.0, "Clear")],
        vec![detection("2024-06-01", "bad", "analyst@example.com")],
    );

    let created = service
        .create(range("2024-06-01", "2024-06-30"), OwnerFilter::all())
        .await
        .unwrap();

    let named = service
        .update_metadata(
            created.id,
            MetadataUpdate {
                name: Some("June correlation".to_string()),
                notes: Some("baseline run".to_string()),
            },
        )
        .await
        .unwrap();

    let rerun = service
        .rerun(created.id, range("2024-06-01", "2024-06-30"), None)
        .await
        .unwrap();

    assert_eq!(rerun.id, created.id);
    assert_eq!(rerun.created_at, created.created_at);
    assert_eq!(rerun.name, named.name);
    assert_eq!(rerun.notes, named.notes);
    assert!(rerun.updated_at.is_some());

    // Identical parameters reproduce identical analytical output
    assert_eq!(rerun.condition_results, created.condition_results);
    assert_eq!(rerun.insights, created.insights);
    assert_eq!(rerun.date_range, created.date_range);
}

#[tokio::test]
async fn rerun_with_a_new_window_recomputes_analytical_fields() {
    let (service, analyses) = service_with(
        vec![
            observation("2024-06-01", 80, 25.0, 0.0, "Clear"),
            observation("2024-07-01", 80, 25.0, 0.0, "Clear"),
        ],
        vec![
            detection("2024-06-01", "bad", "analyst@example.com"),
            detection("2024-07-01", "good", "analyst@example.com"),
        ],
    );

    let created = service
        .create(range("2024-06-01", "2024-06-30"), OwnerFilter::all())
        .await
        .unwrap();
    assert_eq!(created.condition_results[0].disease_rate, 100);

    let rerun = service
        .rerun(created.id, range("2024-07-01", "2024-07-31"), None)
        .await
        .unwrap();

    assert_eq!(rerun.date_range, "2024-07-01 to 2024-07-31");
    assert_eq!(rerun.condition_results[0].disease_rate, 0);

    // The store holds one record only, overwritten in place
    let listed = analyses.list(None, 10).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
}

#[tokio::test]
async fn rerun_of_a_missing_id_fails_fast() {
    let (service, _) = service_with(vec![], vec![]);
    let err = service
        .rerun(Uuid::new_v4(), range("2024-06-01", "2024-06-30"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn metadata_edit_preserves_every_analytical_field() {
    let (service, _) = service_with(
        vec![observation("2024-06-01", 80, 25.0, 0.0, "Clear")],
        vec![detection("2024-06-01", "bad", "analyst@example.com")],
    );

    let created = service
        .create(range("2024-06-01", "2024-06-30"), OwnerFilter::all())
        .await
        .unwrap();

    let edited = service
        .update_metadata(
            created.id,
            MetadataUpdate {
                name: Some("June correlation".to_string()),
                notes: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(edited.name.as_deref(), Some("June correlation"));
    assert_eq!(edited.notes, None);
    assert_eq!(edited.condition_results, created.condition_results);
    assert_eq!(edited.insights, created.insights);
    assert_eq!(edited.weather_count, created.weather_count);
    assert_eq!(edited.detection_count, created.detection_count);
    assert_eq!(edited.date_range, created.date_range);
    assert_eq!(edited.created_at, created.created_at);
    assert_eq!(edited.updated_at, None);
}

#[tokio::test]
async fn metadata_edit_with_no_fields_is_a_no_op_error() {
    let (service, analyses) = service_with(
        vec![observation("2024-06-01", 80, 25.0, 0.0, "Clear")],
        vec![],
    );

    let created = service
        .create(range("2024-06-01", "2024-06-30"), OwnerFilter::all())
        .await
        .unwrap();

    let err = service
        .update_metadata(created.id, MetadataUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoOp(_)));

    // No side effect
    let stored = analyses.get(created.id).await.unwrap().unwrap();
    assert_eq!(stored, created);
}

#[tokio::test]
async fn metadata_edit_of_a_missing_id_reports_not_found() {
    let (service, _) = service_with(vec![], vec![]);
    let err = service
        .update_metadata(
            Uuid::new_v4(),
            MetadataUpdate {
                name: Some("ghost".to_string()),
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn delete_then_get_reports_not_found_and_delete_is_not_silently_idempotent() {
    let (service, _) = service_with(
        vec![observation("2024-06-01", 80, 25.0, 0.0, "Clear")],
        vec![],
    );

    let created = service
        .create(range("2024-06-01", "2024-06-30"), OwnerFilter::all())
        .await
        .unwrap();

    service.delete(created.id).await.unwrap();

    let err = service.get(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = service.delete(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn list_returns_newest_first_and_honors_the_limit() {
    let (service, _) = service_with(
        vec![observation("2024-06-01", 80, 25.0, 0.0, "Clear")],
        vec![],
    );

    let mut ids = Vec::new();
    for _ in 0..3 {
        let record = service
            .create(range("2024-06-01", "2024-06-30"), OwnerFilter::all())
            .await
            .unwrap();
        ids.push(record.id);
    }

    let listed = service.list(&OwnerFilter::all(), 2).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed[0].created_at >= listed[1].created_at);
}

#[tokio::test]
async fn listing_with_the_all_sentinel_spans_every_owner_filter() {
    let (service, _) = service_with(
        vec![observation("2024-06-01", 80, 25.0, 0.0, "Clear")],
        vec![detection("2024-06-01", "bad", "a@example.com")],
    );

    let unfiltered = service
        .create(range("2024-06-01", "2024-06-30"), OwnerFilter::all())
        .await
        .unwrap();
    let owned = service
        .create(
            range("2024-06-01", "2024-06-30"),
            OwnerFilter::from(Some("a@example.com".to_string())),
        )
        .await
        .unwrap();

    // "all" is the no-filter sentinel, not a literal owner_filter match
    let listed = service
        .list(&OwnerFilter::from(Some("all".to_string())), 10)
        .await
        .unwrap();
    assert_eq!(listed.len(), 2);

    let listed = service
        .list(&OwnerFilter::from(Some("a@example.com".to_string())), 10)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, owned.id);
    assert_ne!(listed[0].id, unfiltered.id);
}
