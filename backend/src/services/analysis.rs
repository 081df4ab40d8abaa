//! Analysis record manager
//!
//! Drives the correlation pipeline and owns the lifecycle of persisted
//! analysis snapshots: create, get, list, metadata edit, re-run in place,
//! delete.

use chrono::Utc;
use shared::{AnalysisRecord, DateRange, OwnerFilter};
use uuid::Uuid;

use crate::engine::run_correlation;
use crate::error::{AppError, AppResult};
use crate::stores::{AnalysisStore, DetectionStore, WeatherStore};

/// Fields accepted by a metadata-only edit
#[derive(Debug, Default, Clone)]
pub struct MetadataUpdate {
    pub name: Option<String>,
    pub notes: Option<String>,
}

impl MetadataUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.notes.is_none()
    }
}

/// Service managing analysis snapshots.
///
/// Generic over the store seams so the test suites can substitute in-memory
/// stores for the Postgres implementations.
pub struct AnalysisService<W, D, A> {
    weather: W,
    detections: D,
    analyses: A,
}

impl<W, D, A> AnalysisService<W, D, A>
where
    W: WeatherStore,
    D: DetectionStore,
    A: AnalysisStore,
{
    pub fn new(weather: W, detections: D, analyses: A) -> Self {
        Self {
            weather,
            detections,
            analyses,
        }
    }

    /// Run the correlation pipeline and persist the snapshot.
    ///
    /// A failed aggregation never persists anything; a failed persistence
    /// step surfaces instead of reporting success.
    pub async fn create(
        &self,
        range: DateRange,
        owner_filter: OwnerFilter,
    ) -> AppResult<AnalysisRecord> {
        let run = run_correlation(&self.weather, &self.detections, range, &owner_filter).await?;

        let record = AnalysisRecord {
            id: Uuid::new_v4(),
            date_range: run.range.label(),
            weather_count: run.weather_count,
            detection_count: run.detection_count,
            condition_results: run.condition_results,
            insights: run.insights,
            owner_filter: run.owner_filter.to_string(),
            created_at: Utc::now(),
            updated_at: None,
            name: None,
            notes: None,
        };

        self.analyses.put(&record).await?;

        tracing::info!(analysis_id = %record.id, range = %record.date_range, "analysis created");
        Ok(record)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<AnalysisRecord> {
        self.analyses
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Analysis".to_string()))
    }

    /// List snapshots newest-created-first, capped at `limit`.
    ///
    /// The "all" sentinel (or an empty filter) lists snapshots regardless of
    /// the owner filter they were created with.
    pub async fn list(
        &self,
        owner_filter: &OwnerFilter,
        limit: i64,
    ) -> AppResult<Vec<AnalysisRecord>> {
        self.analyses.list(owner_filter.as_owner(), limit).await
    }

    /// Overwrite only the supplied name/notes fields, leaving every
    /// analytical field and timestamp untouched
    pub async fn update_metadata(
        &self,
        id: Uuid,
        update: MetadataUpdate,
    ) -> AppResult<AnalysisRecord> {
        if update.is_empty() {
            return Err(AppError::NoOp(
                "provide a name or notes to update".to_string(),
            ));
        }

        let mut record = self.get(id).await?;
        if let Some(name) = update.name {
            record.name = Some(name);
        }
        if let Some(notes) = update.notes {
            record.notes = Some(notes);
        }

        self.analyses.put(&record).await?;
        Ok(record)
    }

    /// Recompute every analytical field with new parameters, overwriting the
    /// same record identity.
    ///
    /// Preserves id, creation timestamp, name, and notes; sets the update
    /// timestamp. When no owner filter is supplied the original record's
    /// filter is reused. Two concurrent re-runs of the same id race on the
    /// final write; there is no lock and the last writer wins.
    pub async fn rerun(
        &self,
        id: Uuid,
        range: DateRange,
        owner_filter: Option<OwnerFilter>,
    ) -> AppResult<AnalysisRecord> {
        // Fail fast before recomputing anything
        let existing = self.get(id).await?;

        let owner_filter =
            owner_filter.unwrap_or_else(|| OwnerFilter(existing.owner_filter.clone()));
        let run = run_correlation(&self.weather, &self.detections, range, &owner_filter).await?;

        let record = AnalysisRecord {
            id: existing.id,
            date_range: run.range.label(),
            weather_count: run.weather_count,
            detection_count: run.detection_count,
            condition_results: run.condition_results,
            insights: run.insights,
            owner_filter: run.owner_filter.to_string(),
            created_at: existing.created_at,
            updated_at: Some(Utc::now()),
            name: existing.name,
            notes: existing.notes,
        };

        self.analyses.put(&record).await?;

        tracing::info!(analysis_id = %record.id, range = %record.date_range, "analysis re-run");
        Ok(record)
    }

    /// Permanently remove the snapshot; a second delete reports NotFound
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.analyses.delete(id).await? {
            return Err(AppError::NotFound("Analysis".to_string()));
        }
        tracing::info!(analysis_id = %id, "analysis deleted");
        Ok(())
    }
}
