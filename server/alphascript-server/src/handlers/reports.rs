use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use error_common::codes;
use record_store::{Report, ReportStatus};
use report_engine::ReportRequest;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::parse_optional_id;
use crate::error::{ApiError, ApiResult};
use crate::extractors::CurrentUser;
use crate::server::AlphaScriptServer;

/// Body of `POST /api/v1/generate-report`
///
/// Accepts both snake_case and the camelCase names the web client sends.
/// Not `Debug`: it carries the caller's provider key.
#[derive(Deserialize, Validate)]
pub struct GenerateReportBody {
    #[serde(default, alias = "recordingId")]
    pub recording_id: Option<String>,
    #[serde(default, alias = "reportType")]
    pub report_type: Option<String>,
    #[serde(default, alias = "templateId")]
    pub template_id: Option<String>,
    #[serde(default, alias = "customInstructions")]
    #[validate(length(max = 4000, message = "must be at most 4000 characters"))]
    pub custom_instructions: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, alias = "apiKey")]
    pub api_key: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report: Report,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: String,
}

pub async fn generate_report(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<GenerateReportBody>, JsonRejection>,
) -> ApiResult<Json<ReportResponse>> {
    let Json(body) = payload?;
    body.validate()?;

    let request = ReportRequest {
        recording_id: parse_optional_id("recording_id", body.recording_id.as_deref())?,
        report_type: body.report_type,
        template_id: parse_optional_id("template_id", body.template_id.as_deref())?,
        custom_instructions: body.custom_instructions,
        provider: body.provider,
        api_key: body
            .api_key
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::new),
    };

    let report = server.orchestrator.generate(user, request).await?;
    Ok(Json(ReportResponse { report }))
}

pub async fn list_reports(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Report>>> {
    Ok(Json(server.store.list_reports(user).await?))
}

pub async fn get_report(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    Path(report_id): Path<Uuid>,
) -> ApiResult<Json<Report>> {
    Ok(Json(server.store.get_report(user, report_id).await?))
}

pub async fn update_report_status(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    Path(report_id): Path<Uuid>,
    payload: Result<Json<UpdateStatusBody>, JsonRejection>,
) -> ApiResult<Json<Report>> {
    let Json(body) = payload?;
    let status: ReportStatus = body.status.parse().map_err(|message: String| ApiError::Validation {
        code: codes::validation::INVALID_INPUT,
        message,
        field_errors: None,
    })?;

    let report = server.store.update_report_status(user, report_id, status).await?;
    tracing::info!(report_id = %report.id, status = ?report.status, "Report status updated");
    Ok(Json(report))
}
