//! Recording Service for the AlphaScript Engine
//!
//! Drives consultation recordings from the first click on "record" to a
//! stored transcript.
//!
//! # Features
//!
//! - [`Recorder`]: explicit state machine (idle, recording, paused, stopped)
//!   with an elapsed-time counter that only runs while recording
//! - [`SessionRegistry`]: one recorder per open recording, scoped to its owner
//! - [`TranscriptionProvider`]: pluggable speech-to-text; [`MockTranscriber`]
//!   returns a fixed consultation dialogue
//!
//! # Example Usage
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use recording_service::{format_elapsed, Recorder, RecorderEvent, RecorderState};
//!
//! let start = Instant::now();
//! let mut recorder = Recorder::new();
//! recorder.apply(RecorderEvent::Start, start).unwrap();
//! recorder.apply(RecorderEvent::Stop, start + Duration::from_secs(75)).unwrap();
//!
//! assert_eq!(recorder.state(), RecorderState::Stopped);
//! assert_eq!(format_elapsed(recorder.elapsed(start + Duration::from_secs(90))), "01:15");
//! ```

pub mod error;
pub mod recorder;
pub mod session;
pub mod transcription;

pub use error::*;
pub use recorder::*;
pub use session::*;
pub use transcription::*;
