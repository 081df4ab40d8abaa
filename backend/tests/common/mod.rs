//! In-memory store implementations and fixtures shared by the test suites
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use apm_backend::error::AppResult;
use apm_backend::stores::{AnalysisStore, DetectionStore, WeatherStore};
use shared::{AnalysisRecord, DateRange, DetectionRecord, WeatherObservation};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::new(date(start), date(end)).unwrap()
}

pub fn observation(
    day: &str,
    humidity: i32,
    temperature: f64,
    rainfall: f64,
    conditions: &str,
) -> WeatherObservation {
    WeatherObservation {
        id: Uuid::new_v4(),
        location: "North field".to_string(),
        observed_at: Utc.from_utc_datetime(&date(day).and_hms_opt(9, 0, 0).unwrap()),
        temperature_celsius: temperature,
        humidity_percent: humidity,
        rainfall_mm: rainfall,
        wind_speed_kmh: 6.0,
        cloud_cover_percent: None,
        conditions: conditions.to_string(),
        fetched_at: Utc::now(),
    }
}

pub fn detection(day: &str, label: &str, owner: &str) -> DetectionRecord {
    DetectionRecord {
        id: Uuid::new_v4(),
        owner: owner.to_string(),
        created_at: Utc.from_utc_datetime(&date(day).and_hms_opt(14, 0, 0).unwrap()),
        label: label.to_string(),
        farmer_name: Some("Somchai".to_string()),
        location: Some("North field".to_string()),
    }
}

/// Weather store over a fixed in-memory observation set
#[derive(Clone, Default)]
pub struct MemoryWeatherStore {
    observations: Arc<RwLock<Vec<WeatherObservation>>>,
}

impl MemoryWeatherStore {
    pub fn new(observations: Vec<WeatherObservation>) -> Self {
        Self {
            observations: Arc::new(RwLock::new(observations)),
        }
    }
}

#[async_trait]
impl WeatherStore for MemoryWeatherStore {
    async fn query(&self, range: DateRange) -> AppResult<Vec<WeatherObservation>> {
        Ok(self
            .observations
            .read()
            .await
            .iter()
            .filter(|obs| range.contains(obs.observation_date()))
            .cloned()
            .collect())
    }

    async fn delete_for_date(&self, day: NaiveDate) -> AppResult<u64> {
        let mut observations = self.observations.write().await;
        let before = observations.len();
        observations.retain(|obs| obs.observation_date() != day);
        Ok((before - observations.len()) as u64)
    }
}

/// Detection store over a fixed in-memory record set
#[derive(Clone, Default)]
pub struct MemoryDetectionStore {
    detections: Arc<RwLock<Vec<DetectionRecord>>>,
}

impl MemoryDetectionStore {
    pub fn new(detections: Vec<DetectionRecord>) -> Self {
        Self {
            detections: Arc::new(RwLock::new(detections)),
        }
    }
}

#[async_trait]
impl DetectionStore for MemoryDetectionStore {
    async fn query(
        &self,
        range: DateRange,
        owner: Option<&str>,
    ) -> AppResult<Vec<DetectionRecord>> {
        Ok(self
            .detections
            .read()
            .await
            .iter()
            .filter(|d| range.contains(d.detection_date()))
            .filter(|d| owner.map_or(true, |o| d.owner == o))
            .cloned()
            .collect())
    }
}

/// Analysis sink keyed by identifier
#[derive(Clone, Default)]
pub struct MemoryAnalysisStore {
    records: Arc<RwLock<HashMap<Uuid, AnalysisRecord>>>,
}

impl MemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for MemoryAnalysisStore {
    async fn put(&self, record: &AnalysisRecord) -> AppResult<()> {
        self.records
            .write()
            .await
            .insert(record.id, record.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<AnalysisRecord>> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn list(&self, owner: Option<&str>, limit: i64) -> AppResult<Vec<AnalysisRecord>> {
        let records = self.records.read().await;
        let mut listed: Vec<AnalysisRecord> = records
            .values()
            .filter(|r| owner.map_or(true, |o| r.owner_filter == o))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listed.truncate(limit.max(0) as usize);
        Ok(listed)
    }
}
