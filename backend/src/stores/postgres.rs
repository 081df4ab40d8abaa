//! Postgres implementations of the store contracts

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{AnalysisRecord, DateRange, DetectionRecord, WeatherObservation};

use crate::error::{AppError, AppResult};
use crate::stores::{AnalysisStore, DetectionStore, WeatherStore};

/// Weather observation store backed by the weather_observations table
#[derive(Clone)]
pub struct PgWeatherStore {
    db: PgPool,
}

impl PgWeatherStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(FromRow)]
struct WeatherRow {
    id: Uuid,
    location: String,
    observed_at: DateTime<Utc>,
    temperature_celsius: f64,
    humidity_percent: i32,
    rainfall_mm: f64,
    wind_speed_kmh: f64,
    cloud_cover_percent: Option<i32>,
    conditions: String,
    fetched_at: DateTime<Utc>,
}

impl From<WeatherRow> for WeatherObservation {
    fn from(row: WeatherRow) -> Self {
        Self {
            id: row.id,
            location: row.location,
            observed_at: row.observed_at,
            temperature_celsius: row.temperature_celsius,
            humidity_percent: row.humidity_percent,
            rainfall_mm: row.rainfall_mm,
            wind_speed_kmh: row.wind_speed_kmh,
            cloud_cover_percent: row.cloud_cover_percent,
            conditions: row.conditions,
            fetched_at: row.fetched_at,
        }
    }
}

#[async_trait]
impl WeatherStore for PgWeatherStore {
    async fn query(&self, range: DateRange) -> AppResult<Vec<WeatherObservation>> {
        let rows = sqlx::query_as::<_, WeatherRow>(
            r#"
            SELECT id, location, observed_at, temperature_celsius, humidity_percent,
                   rainfall_mm, wind_speed_kmh, cloud_cover_percent, conditions, fetched_at
            FROM weather_observations
            WHERE observed_at >= $1::date
              AND observed_at < ($2::date + INTERVAL '1 day')
            ORDER BY observed_at DESC
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_for_date(&self, date: NaiveDate) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM weather_observations
            WHERE observed_at >= $1::date
              AND observed_at < ($1::date + INTERVAL '1 day')
            "#,
        )
        .bind(date)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Detection store backed by the detections table
#[derive(Clone)]
pub struct PgDetectionStore {
    db: PgPool,
}

impl PgDetectionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(FromRow)]
struct DetectionRow {
    id: Uuid,
    owner: String,
    created_at: DateTime<Utc>,
    label: String,
    farmer_name: Option<String>,
    location: Option<String>,
}

impl From<DetectionRow> for DetectionRecord {
    fn from(row: DetectionRow) -> Self {
        Self {
            id: row.id,
            owner: row.owner,
            created_at: row.created_at,
            label: row.label,
            farmer_name: row.farmer_name,
            location: row.location,
        }
    }
}

#[async_trait]
impl DetectionStore for PgDetectionStore {
    async fn query(
        &self,
        range: DateRange,
        owner: Option<&str>,
    ) -> AppResult<Vec<DetectionRecord>> {
        let rows = sqlx::query_as::<_, DetectionRow>(
            r#"
            SELECT id, owner, created_at, label, farmer_name, location
            FROM detections
            WHERE created_at >= $1::date
              AND created_at < ($2::date + INTERVAL '1 day')
              AND ($3::text IS NULL OR owner = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .bind(owner)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

/// Analysis snapshot store backed by the pest_analyses table.
///
/// The ranked condition results and insights are stored as JSONB alongside
/// the scalar snapshot fields.
#[derive(Clone)]
pub struct PgAnalysisStore {
    db: PgPool,
}

impl PgAnalysisStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(FromRow)]
struct AnalysisRow {
    id: Uuid,
    date_range: String,
    weather_count: i32,
    detection_count: i32,
    condition_results: serde_json::Value,
    insights: serde_json::Value,
    owner_filter: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    name: Option<String>,
    notes: Option<String>,
}

impl TryFrom<AnalysisRow> for AnalysisRecord {
    type Error = AppError;

    fn try_from(row: AnalysisRow) -> Result<Self, Self::Error> {
        let condition_results = serde_json::from_value(row.condition_results)
            .map_err(|e| AppError::Internal(e.into()))?;
        let insights =
            serde_json::from_value(row.insights).map_err(|e| AppError::Internal(e.into()))?;

        Ok(Self {
            id: row.id,
            date_range: row.date_range,
            weather_count: row.weather_count as u32,
            detection_count: row.detection_count as u32,
            condition_results,
            insights,
            owner_filter: row.owner_filter,
            created_at: row.created_at,
            updated_at: row.updated_at,
            name: row.name,
            notes: row.notes,
        })
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn put(&self, record: &AnalysisRecord) -> AppResult<()> {
        let condition_results = serde_json::to_value(&record.condition_results)
            .map_err(|e| AppError::Internal(e.into()))?;
        let insights =
            serde_json::to_value(&record.insights).map_err(|e| AppError::Internal(e.into()))?;

        sqlx::query(
            r#"
            INSERT INTO pest_analyses (
                id, date_range, weather_count, detection_count, condition_results,
                insights, owner_filter, created_at, updated_at, name, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                date_range = EXCLUDED.date_range,
                weather_count = EXCLUDED.weather_count,
                detection_count = EXCLUDED.detection_count,
                condition_results = EXCLUDED.condition_results,
                insights = EXCLUDED.insights,
                owner_filter = EXCLUDED.owner_filter,
                updated_at = EXCLUDED.updated_at,
                name = EXCLUDED.name,
                notes = EXCLUDED.notes
            "#,
        )
        .bind(record.id)
        .bind(&record.date_range)
        .bind(record.weather_count as i32)
        .bind(record.detection_count as i32)
        .bind(&condition_results)
        .bind(&insights)
        .bind(&record.owner_filter)
        .bind(record.created_at)
        .bind(record.updated_at)
        .bind(&record.name)
        .bind(&record.notes)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<AnalysisRecord>> {
        let row = sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT id, date_range, weather_count, detection_count, condition_results,
                   insights, owner_filter, created_at, updated_at, name, notes
            FROM pest_analyses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.map(AnalysisRecord::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM pest_analyses WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, owner: Option<&str>, limit: i64) -> AppResult<Vec<AnalysisRecord>> {
        let rows = sqlx::query_as::<_, AnalysisRow>(
            r#"
            SELECT id, date_range, weather_count, detection_count, condition_results,
                   insights, owner_filter, created_at, updated_at, name, notes
            FROM pest_analyses
            WHERE ($1::text IS NULL OR owner_filter = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(owner)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(AnalysisRecord::try_from).collect()
    }
}
