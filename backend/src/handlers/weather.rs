//! HTTP handlers for weather observation endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use shared::{DateRange, WeatherObservation};

use crate::error::AppResult;
use crate::services::weather::WeatherService;
use crate::stores::postgres::PgWeatherStore;
use crate::AppState;

fn service(state: &AppState) -> WeatherService<PgWeatherStore> {
    WeatherService::new(PgWeatherStore::new(state.db.clone()))
}

/// Query parameters for weather observations by date range
#[derive(Debug, Deserialize)]
pub struct WeatherRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Get weather observations for a date range
pub async fn list_weather_observations(
    State(state): State<AppState>,
    Query(query): Query<WeatherRangeQuery>,
) -> AppResult<Json<Vec<WeatherObservation>>> {
    let range = DateRange::resolve(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        Utc::now().date_naive(),
    )?;
    let observations = service(&state).query_range(range).await?;
    Ok(Json(observations))
}

#[derive(Serialize)]
pub struct DeleteWeatherResponse {
    pub date: NaiveDate,
    pub deleted: u64,
}

/// Delete all weather observations recorded on a calendar date
pub async fn delete_weather_for_date(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<DeleteWeatherResponse>> {
    let deleted = service(&state).delete_for_date(date).await?;
    Ok(Json(DeleteWeatherResponse { date, deleted }))
}
