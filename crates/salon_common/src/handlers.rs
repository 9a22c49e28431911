// --- File: crates/salon_common/src/handlers.rs ---
use axum::{extract::State, Json};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Static descriptor reported by the health endpoint.
#[derive(Debug, Clone)]
pub struct HealthInfo {
    pub service: String,
    pub version: String,
    pub features: Vec<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct HealthResponse {
    #[cfg_attr(feature = "openapi", schema(example = "ok"))]
    pub status: String,
    #[cfg_attr(feature = "openapi", schema(example = "Book Appointment"))]
    pub service: String,
    pub version: String,
    pub features: Vec<String>,
    /// RFC 3339, UTC, millisecond precision
    pub timestamp: String,
}

/// Liveness check. Never touches upstream services.
pub async fn health_handler(State(info): State<Arc<HealthInfo>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: info.service.clone(),
        version: info.version.clone(),
        features: info.features.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
