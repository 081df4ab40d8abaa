//! Service health endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize, PartialEq)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub database: DatabaseStatus,
}

/// Reachability of the analysis persistence database
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
    Connected,
    Unreachable,
}

fn health_response(database: DatabaseStatus) -> HealthResponse {
    let status = match database {
        DatabaseStatus::Connected => "healthy",
        DatabaseStatus::Unreachable => "degraded",
    };
    HealthResponse {
        status,
        service: "agripest-monitoring",
        version: env!("CARGO_PKG_VERSION"),
        database,
    }
}

/// Report service identity and database reachability
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => DatabaseStatus::Connected,
        Err(_) => DatabaseStatus::Unreachable,
    };

    Json(health_response(database))
}
