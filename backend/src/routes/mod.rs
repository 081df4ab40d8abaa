//! Route definitions for the AgriPest Monitoring Platform

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Correlation analyses
        .nest("/analyses", analysis_routes())
        // Weather observations
        .nest("/weather", weather_routes())
}

/// Correlation analysis routes
fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_analyses).post(handlers::create_analysis),
        )
        .route(
            "/:analysis_id",
            get(handlers::get_analysis)
                .put(handlers::update_analysis_metadata)
                .delete(handlers::delete_analysis),
        )
        .route("/:analysis_id/rerun", post(handlers::rerun_analysis))
}

/// Weather observation routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_weather_observations))
        .route("/:date", delete(handlers::delete_weather_for_date))
}
