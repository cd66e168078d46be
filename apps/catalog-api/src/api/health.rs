//! Health check endpoints

use axum::{routing::get, Json, Router};
use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "catalog-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn ready(state: AppState) -> Json<HealthResponse> {
    // Check database connectivity
    let status = match state
        .db
        .execute_unprepared("SELECT 1")
        .await
    {
        Ok(_) => "ready",
        Err(_) => "degraded",
    };

    Json(HealthResponse {
        status: status.to_string(),
        service: "catalog-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(move || ready(state)))
}
