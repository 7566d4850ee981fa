use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use record_store::{NewTemplate, ReportType, Template};
use report_engine::ReportContext;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

use super::parse_optional_id;
use crate::error::{ApiError, ApiResult};
use crate::extractors::CurrentUser;
use crate::server::AlphaScriptServer;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub name: String,
    #[serde(alias = "templateType")]
    pub template_type: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CreateTemplateResponse {
    pub template: Template,
    /// Placeholders generation will not be able to fill
    pub unresolved_tokens: Vec<String>,
}

/// Body of `POST /api/v1/templates/preview`
///
/// Context comes from `recording_id` when given, otherwise from the inline fields.
#[derive(Debug, Deserialize)]
pub struct PreviewTemplateRequest {
    pub content: String,
    #[serde(default, alias = "recordingId")]
    pub recording_id: Option<String>,
    #[serde(default, alias = "reportType")]
    pub report_type: Option<String>,
    #[serde(default, alias = "patientName")]
    pub patient_name: Option<String>,
    #[serde(default, alias = "dateOfBirth")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub transcription: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewTemplateResponse {
    pub content: String,
}

pub async fn list_templates(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<Template>>> {
    Ok(Json(server.store.list_templates(user).await?))
}

pub async fn create_template(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CreateTemplateRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateTemplateResponse>)> {
    let Json(req) = payload?;
    req.validate()?;

    let template_type: ReportType = req
        .template_type
        .parse()
        .map_err(|err: record_store::UnknownReportType| {
            ApiError::invalid_field("template_type", err.to_string())
        })?;

    let unresolved_tokens = server.resolver.unresolved(&req.content);
    let template = server
        .store
        .create_template(
            user,
            NewTemplate {
                name: req.name,
                template_type,
                content: req.content,
            },
        )
        .await?;

    if !unresolved_tokens.is_empty() {
        warn!(
            template_id = %template.id,
            tokens = ?unresolved_tokens,
            "Template saved with unresolved placeholders"
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateTemplateResponse {
            template,
            unresolved_tokens,
        }),
    ))
}

pub async fn get_template(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    Path(template_id): Path<Uuid>,
) -> ApiResult<Json<Template>> {
    Ok(Json(server.store.get_template(user, template_id).await?))
}

pub async fn delete_template(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    Path(template_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    server.store.delete_template(user, template_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve a template strictly; unknown placeholders are a 422
pub async fn preview_template(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<PreviewTemplateRequest>, JsonRejection>,
) -> ApiResult<Json<PreviewTemplateResponse>> {
    let Json(req) = payload?;

    let report_type = req
        .report_type
        .as_deref()
        .map(ReportType::resolve)
        .unwrap_or(ReportType::Consultation);
    let today = chrono::Utc::now().date_naive();

    let ctx = match parse_optional_id("recording_id", req.recording_id.as_deref())? {
        Some(recording_id) => {
            let recording = server.store.get_recording(user, recording_id).await?;
            ReportContext::from_recording(report_type, &recording, today)
        }
        None => {
            let ctx = ReportContext::new(report_type, req.transcription.unwrap_or_default(), today);
            match req.patient_name {
                Some(name) => ctx.with_patient(name, req.date_of_birth),
                None => ctx,
            }
        }
    };

    let content = server.resolver.resolve(&req.content, &ctx)?;
    Ok(Json(PreviewTemplateResponse { content }))
}
