use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use error_common::codes;
use record_store::RecordingStatus;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use super::parse_optional_id;
use crate::error::{ApiError, ApiResult};
use crate::extractors::CurrentUser;
use crate::server::AlphaScriptServer;

/// Body of `POST /api/v1/process-audio`
#[derive(Debug, Deserialize)]
pub struct ProcessAudioBody {
    #[serde(default, alias = "recordingId")]
    pub recording_id: Option<String>,
    /// Base64 encoded audio; optional
    #[serde(default, alias = "audioBlob")]
    pub audio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessAudioResponse {
    pub transcription: String,
    pub status: RecordingStatus,
}

/// Transcribe a recording and mark it completed
pub async fn process_audio(
    State(server): State<AlphaScriptServer>,
    CurrentUser(user): CurrentUser,
    payload: Result<Json<ProcessAudioBody>, JsonRejection>,
) -> ApiResult<Json<ProcessAudioResponse>> {
    let Json(body) = payload?;

    let recording_id = parse_optional_id("recording_id", body.recording_id.as_deref())?
        .ok_or_else(|| ApiError::Validation {
            code: codes::validation::MISSING_REQUIRED_FIELD,
            message: "Missing required field: recording_id".to_string(),
            field_errors: None,
        })?;

    let audio = match body.audio.as_deref().map(str::trim) {
        None | Some("") => Vec::new(),
        Some(encoded) => STANDARD
            .decode(encoded)
            .map_err(|_| ApiError::invalid_field("audio", "must be base64 encoded"))?,
    };

    // Ownership check before any transcription work
    server.store.get_recording(user, recording_id).await?;

    let result = server.transcriber.transcribe(&audio).await?;
    debug!(
        %recording_id,
        provider = %result.provider,
        audio_bytes = result.audio_bytes,
        "Transcription finished"
    );

    let recording = server
        .store
        .complete_recording(user, recording_id, result.text)
        .await?;

    if let Ok(snapshot) = server.sessions.close(recording_id, user, Instant::now()).await {
        debug!(%recording_id, elapsed = %snapshot.elapsed, "Recorder session closed");
    }

    info!(%recording_id, "Recording processed");
    Ok(Json(ProcessAudioResponse {
        transcription: recording.transcription,
        status: recording.status,
    }))
}
