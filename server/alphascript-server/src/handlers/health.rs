use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::AlphaScriptServer;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service health status
    pub status: String,
    /// Current timestamp in RFC3339 format
    pub timestamp: String,
    pub version: String,
    /// Uptime in seconds
    pub uptime: u64,
    pub service: String,
    /// Report providers the server can call
    pub providers: Vec<String>,
}

/// Liveness probe; requires no authentication
pub async fn health_check(State(server): State<AlphaScriptServer>) -> Json<HealthResponse> {
    let providers = server
        .orchestrator
        .providers()
        .kinds()
        .into_iter()
        .map(|kind| kind.to_string())
        .collect();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: server.uptime_seconds(),
        service: server.config.server.name.clone(),
        providers,
    })
}
