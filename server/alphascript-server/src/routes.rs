use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{
    handlers::{audio, health, patients, recordings, reports, templates},
    server::AlphaScriptServer,
};

/// Route path constants
pub mod paths {
    pub const API_V1: &str = "/api/v1";

    pub mod health {
        pub const HEALTH: &str = "/health";
    }

    pub mod reports {
        pub const GENERATE: &str = "/generate-report";
        pub const REPORTS: &str = "/reports";
        pub const REPORT_BY_ID: &str = "/reports/:id";
        pub const REPORT_STATUS: &str = "/reports/:id/status";
    }

    pub mod audio {
        pub const PROCESS: &str = "/process-audio";
    }

    pub mod patients {
        pub const PATIENTS: &str = "/patients";
        pub const PATIENT_BY_ID: &str = "/patients/:id";
    }

    pub mod recordings {
        pub const RECORDINGS: &str = "/recordings";
        pub const RECORDING_BY_ID: &str = "/recordings/:id";
        pub const SESSION: &str = "/recordings/:id/session";
        pub const SESSION_EVENT: &str = "/recordings/:id/session/:event";
    }

    pub mod templates {
        pub const TEMPLATES: &str = "/templates";
        pub const TEMPLATE_BY_ID: &str = "/templates/:id";
        pub const PREVIEW: &str = "/templates/preview";
    }
}

/// Create health check routes
pub fn health_routes() -> Router<AlphaScriptServer> {
    Router::new().route(paths::health::HEALTH, get(health::health_check))
}

/// Create report generation and report management routes
pub fn report_routes() -> Router<AlphaScriptServer> {
    Router::new()
        .route(paths::reports::GENERATE, post(reports::generate_report))
        .route(paths::reports::REPORTS, get(reports::list_reports))
        .route(paths::reports::REPORT_BY_ID, get(reports::get_report))
        .route(paths::reports::REPORT_STATUS, put(reports::update_report_status))
}

/// Create audio processing routes
pub fn audio_routes() -> Router<AlphaScriptServer> {
    Router::new().route(paths::audio::PROCESS, post(audio::process_audio))
}

pub fn patient_routes() -> Router<AlphaScriptServer> {
    Router::new()
        .route(
            paths::patients::PATIENTS,
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(paths::patients::PATIENT_BY_ID, get(patients::get_patient))
}

/// Create recording and recorder session routes
pub fn recording_routes() -> Router<AlphaScriptServer> {
    Router::new()
        .route(
            paths::recordings::RECORDINGS,
            get(recordings::list_recordings).post(recordings::create_recording),
        )
        .route(paths::recordings::RECORDING_BY_ID, get(recordings::get_recording))
        .route(paths::recordings::SESSION, get(recordings::session_snapshot))
        .route(paths::recordings::SESSION_EVENT, post(recordings::session_event))
}

pub fn template_routes() -> Router<AlphaScriptServer> {
    Router::new()
        .route(
            paths::templates::TEMPLATES,
            get(templates::list_templates).post(templates::create_template),
        )
        .route(paths::templates::PREVIEW, post(templates::preview_template))
        .route(
            paths::templates::TEMPLATE_BY_ID,
            get(templates::get_template).delete(templates::delete_template),
        )
}

/// API v1 routes; every handler requires a bearer token
fn api_v1_routes() -> Router<AlphaScriptServer> {
    Router::new()
        .merge(report_routes())
        .merge(audio_routes())
        .merge(patient_routes())
        .merge(recording_routes())
        .merge(template_routes())
}

/// Create all application routes
pub fn create_routes() -> Router<AlphaScriptServer> {
    Router::new()
        // Health check routes (no authentication required)
        .merge(health_routes())
        .nest(paths::API_V1, api_v1_routes())
}
