use thiserror::Error;
use uuid::Uuid;

use crate::recorder::{RecorderEvent, RecorderState};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordingError {
    #[error("Cannot {event} while {from}")]
    InvalidTransition {
        from: RecorderState,
        event: RecorderEvent,
    },

    #[error("Unknown recorder event: {0}")]
    UnknownEvent(String),

    #[error("No recording session for {0}")]
    SessionNotFound(Uuid),

    #[error("Transcription error: {0}")]
    Transcription(String),
}

pub type RecordingResult<T> = Result<T, RecordingError>;
