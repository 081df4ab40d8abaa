//! HTTP handlers for correlation analysis endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::{AnalysisRecord, DateRange, OwnerFilter};

use crate::error::AppResult;
use crate::services::analysis::{AnalysisService, MetadataUpdate};
use crate::stores::postgres::{PgAnalysisStore, PgDetectionStore, PgWeatherStore};
use crate::AppState;

fn service(state: &AppState) -> AnalysisService<PgWeatherStore, PgDetectionStore, PgAnalysisStore> {
    AnalysisService::new(
        PgWeatherStore::new(state.db.clone()),
        PgDetectionStore::new(state.db.clone()),
        PgAnalysisStore::new(state.db.clone()),
    )
}

/// Parameters for an analysis run (create or re-run).
///
/// Missing end date defaults to today; missing start date to 30 days before
/// the end date.
#[derive(Debug, Deserialize)]
pub struct RunAnalysisInput {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub owner_filter: Option<String>,
}

impl RunAnalysisInput {
    fn range(&self) -> AppResult<DateRange> {
        Ok(DateRange::resolve(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            Utc::now().date_naive(),
        )?)
    }
}

/// Run a correlation analysis and persist the snapshot
pub async fn create_analysis(
    State(state): State<AppState>,
    Json(input): Json<RunAnalysisInput>,
) -> AppResult<Json<AnalysisRecord>> {
    let range = input.range()?;
    let owner_filter = OwnerFilter::from(input.owner_filter);
    let record = service(&state).create(range, owner_filter).await?;
    Ok(Json(record))
}

/// Get an analysis snapshot by ID
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(analysis_id): Path<Uuid>,
) -> AppResult<Json<AnalysisRecord>> {
    let record = service(&state).get(analysis_id).await?;
    Ok(Json(record))
}

/// Query parameters for listing analyses
#[derive(Debug, Deserialize)]
pub struct ListAnalysesQuery {
    pub owner: Option<String>,
    pub limit: Option<i64>,
}

/// List analysis snapshots, newest first
pub async fn list_analyses(
    State(state): State<AppState>,
    Query(query): Query<ListAnalysesQuery>,
) -> AppResult<Json<Vec<AnalysisRecord>>> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let owner_filter = OwnerFilter::from(query.owner);
    let records = service(&state).list(&owner_filter, limit).await?;
    Ok(Json(records))
}

/// Metadata edit input; at least one field must be supplied
#[derive(Debug, Deserialize)]
pub struct UpdateAnalysisInput {
    pub name: Option<String>,
    pub notes: Option<String>,
}

/// Update the name and/or notes of an analysis, leaving analytical fields
/// untouched
pub async fn update_analysis_metadata(
    State(state): State<AppState>,
    Path(analysis_id): Path<Uuid>,
    Json(input): Json<UpdateAnalysisInput>,
) -> AppResult<Json<AnalysisRecord>> {
    let update = MetadataUpdate {
        name: input.name,
        notes: input.notes,
    };
    let record = service(&state).update_metadata(analysis_id, update).await?;
    Ok(Json(record))
}

/// Re-run an analysis with new parameters, overwriting the stored snapshot
/// in place
pub async fn rerun_analysis(
    State(state): State<AppState>,
    Path(analysis_id): Path<Uuid>,
    Json(input): Json<RunAnalysisInput>,
) -> AppResult<Json<AnalysisRecord>> {
    let range = input.range()?;
    let owner_filter = input.owner_filter.map(|v| OwnerFilter::from(Some(v)));
    let record = service(&state)
        .rerun(analysis_id, range, owner_filter)
        .await?;
    Ok(Json(record))
}

#[derive(Serialize)]
pub struct DeleteAnalysisResponse {
    pub deleted: Uuid,
}

/// Delete an analysis snapshot
pub async fn delete_analysis(
    State(state): State<AppState>,
    Path(analysis_id): Path<Uuid>,
) -> AppResult<Json<DeleteAnalysisResponse>> {
    service(&state).delete(analysis_id).await?;
    Ok(Json(DeleteAnalysisResponse {
        deleted: analysis_id,
    }))
}
