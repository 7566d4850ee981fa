use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::RecordingResult;

/// Transcription result from a speech-to-text provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub id: Uuid,
    pub text: String,
    pub provider: String,
    /// Size of the audio that was submitted
    pub audio_bytes: usize,
    pub created_at: DateTime<Utc>,
}

/// Trait for speech-to-text providers
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Transcribe recorded audio; `audio` may be empty
    async fn transcribe(&self, audio: &[u8]) -> RecordingResult<TranscriptionResult>;
}

/// Fixed consultation dialogue used until a real speech-to-text backend is wired in
pub const MOCK_CONSULTATION: &str = "\
Doctor: Good morning, how are you feeling today?
Patient: I've been experiencing some chest pain and shortness of breath over the past few days.
Doctor: Can you describe the pain? Is it sharp, dull, or pressure-like?
Patient: It's more of a sharp pain that comes and goes, especially when I take deep breaths.
Doctor: I see. Any other symptoms? Dizziness, nausea, or palpitations?
Patient: No, just the chest pain and some mild shortness of breath when I exert myself.
Doctor: Let me examine you. Your vital signs look stable. Heart rate is 78, blood pressure 130/85.
Doctor: Based on the examination, this appears to be musculoskeletal in nature, likely costochondritis.
Doctor: I recommend NSAIDs for pain management and rest. Follow up if symptoms persist or worsen.";

/// First line of [`MOCK_CONSULTATION`], shown as the live transcript once recording starts
pub fn live_opening_line() -> &'static str {
    MOCK_CONSULTATION.lines().next().unwrap_or_default()
}

/// Transcriber that ignores the audio and returns [`MOCK_CONSULTATION`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MockTranscriber;

#[async_trait]
impl TranscriptionProvider for MockTranscriber {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transcribe(&self, audio: &[u8]) -> RecordingResult<TranscriptionResult> {
        debug!(audio_size = audio.len(), "Transcribing audio with mock provider");

        Ok(TranscriptionResult {
            id: Uuid::new_v4(),
            text: MOCK_CONSULTATION.to_string(),
            provider: self.name().to_string(),
            audio_bytes: audio.len(),
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transcriber_returns_dialogue() {
        let result = MockTranscriber.transcribe(&[0u8; 32]).await.unwrap();

        assert!(result.text.starts_with("Doctor: Good morning"));
        assert!(result.text.contains("costochondritis"));
        assert_eq!(result.audio_bytes, 32);
        assert_eq!(result.provider, "mock");
    }

    #[test]
    fn test_result_serializes() {
        let result = tokio_test::block_on(MockTranscriber.transcribe(&[])).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["audio_bytes"], 0);
    }
}
