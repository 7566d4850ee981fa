use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use record_store::{NewRecording, Recording, RecordingWithPatient};
use recording_service::{RecorderEvent, SessionSnapshot};
use serde::Deserialize;
use std::time::Instant;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::extractors::CurrentUser;
use crate::server::AlphaScriptServer;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecordingRequest {
    #[serde(alias = "patientId")]
    pub patient_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: String,
}

pub async fn list_recordings(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<Vec<RecordingWithPatient>>> {
    Ok(Json(server.store.list_recordings(user).await?))
}

/// Create a recording row in the `recording` state and open its recorder session
pub async fn create_recording(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<CreateRecordingRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Recording>)> {
    let Json(req) = payload?;
    req.validate()?;

    let recording = server
        .store
        .create_recording(
            user,
            NewRecording {
                patient_id: req.patient_id,
                title: req.title,
            },
        )
        .await?;

    server.sessions.open(recording.id, user, Instant::now()).await?;

    Ok((StatusCode::CREATED, Json(recording)))
}

pub async fn get_recording(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    Path(recording_id): Path<Uuid>,
) -> ApiResult<Json<RecordingWithPatient>> {
    Ok(Json(server.store.get_recording(user, recording_id).await?))
}

/// Drive the recorder: `start`, `pause`, `resume`, `stop` or `reset`
pub async fn session_event(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    Path((recording_id, event)): Path<(Uuid, String)>,
) -> ApiResult<Json<SessionSnapshot>> {
    let event: RecorderEvent = event.parse()?;
    server.store.get_recording(user, recording_id).await?;

    let snapshot = server
        .sessions
        .apply(recording_id, user, event, Instant::now())
        .await?;
    Ok(Json(snapshot))
}

pub async fn session_snapshot(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    Path(recording_id): Path<Uuid>,
) -> ApiResult<Json<SessionSnapshot>> {
    server.store.get_recording(user, recording_id).await?;

    let snapshot = server
        .sessions
        .snapshot(recording_id, user, Instant::now())
        .await?;
    Ok(Json(snapshot))
}
