use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::error::{RecordingError, RecordingResult};

/// Recorder status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecorderState {
    Idle,
    Recording,
    Paused,
    Stopped,
}

impl RecorderState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecorderState::Idle => "idle",
            RecorderState::Recording => "recording",
            RecorderState::Paused => "paused",
            RecorderState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecorderEvent {
    Start,
    Pause,
    Resume,
    Stop,
    Reset,
}

impl RecorderEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecorderEvent::Start => "start",
            RecorderEvent::Pause => "pause",
            RecorderEvent::Resume => "resume",
            RecorderEvent::Stop => "stop",
            RecorderEvent::Reset => "reset",
        }
    }
}

impl FromStr for RecorderEvent {
    type Err = RecordingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(RecorderEvent::Start),
            "pause" => Ok(RecorderEvent::Pause),
            "resume" => Ok(RecorderEvent::Resume),
            "stop" => Ok(RecorderEvent::Stop),
            "reset" => Ok(RecorderEvent::Reset),
            other => Err(RecordingError::UnknownEvent(other.to_string())),
        }
    }
}

impl fmt::Display for RecorderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audio recorder state machine
///
/// Time is supplied by the caller on every transition, so the machine never
/// reads a clock itself. Elapsed time accumulates only while recording and
/// survives stop and restart; reset clears it.
#[derive(Debug, Clone)]
pub struct Recorder {
    state: RecorderState,
    accumulated: Duration,
    running_since: Option<Instant>,
    transcript: String,
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            state: RecorderState::Idle,
            accumulated: Duration::ZERO,
            running_since: None,
            transcript: String::new(),
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Apply `event` at time `now` and return the new state
    pub fn apply(&mut self, event: RecorderEvent, now: Instant) -> RecordingResult<RecorderState> {
        use RecorderEvent::*;
        use RecorderState::*;

        let next = match (self.state, event) {
            (Idle | Stopped, Start) | (Paused, Resume) => {
                self.running_since = Some(now);
                Recording
            }
            (Recording, Pause) => {
                self.bank(now);
                Paused
            }
            (Recording, Stop) => {
                self.bank(now);
                Stopped
            }
            (Paused, Stop) => Stopped,
            (_, Reset) => {
                self.accumulated = Duration::ZERO;
                self.running_since = None;
                self.transcript.clear();
                Idle
            }
            (from, event) => return Err(RecordingError::InvalidTransition { from, event }),
        };

        self.state = next;
        Ok(next)
    }

    /// Total time spent recording as of `now`
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + now.saturating_duration_since(since),
            None => self.accumulated,
        }
    }

    /// Live transcript gathered during this recording
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn append_transcript(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        if !self.transcript.is_empty() {
            self.transcript.push('\n');
        }
        self.transcript.push_str(text.trim());
    }

    fn bank(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }
}

/// Render a duration as `MM:SS`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, secs: u64) -> Instant {
        start + Duration::from_secs(secs)
    }

    #[test]
    fn test_full_cycle() {
        let t0 = Instant::now();
        let mut recorder = Recorder::new();

        assert_eq!(recorder.apply(RecorderEvent::Start, t0), Ok(RecorderState::Recording));
        assert_eq!(recorder.apply(RecorderEvent::Pause, at(t0, 10)), Ok(RecorderState::Paused));
        assert_eq!(recorder.apply(RecorderEvent::Resume, at(t0, 30)), Ok(RecorderState::Recording));
        assert_eq!(recorder.apply(RecorderEvent::Stop, at(t0, 35)), Ok(RecorderState::Stopped));

        assert_eq!(recorder.elapsed(at(t0, 100)), Duration::from_secs(15));
    }

    #[test]
    fn test_elapsed_runs_only_while_recording() {
        let t0 = Instant::now();
        let mut recorder = Recorder::new();
        recorder.apply(RecorderEvent::Start, t0).unwrap();

        assert_eq!(recorder.elapsed(at(t0, 7)), Duration::from_secs(7));

        recorder.apply(RecorderEvent::Pause, at(t0, 7)).unwrap();
        assert_eq!(recorder.elapsed(at(t0, 60)), Duration::from_secs(7));
    }

    #[test]
    fn test_restart_after_stop_keeps_elapsed() {
        let t0 = Instant::now();
        let mut recorder = Recorder::new();
        recorder.apply(RecorderEvent::Start, t0).unwrap();
        recorder.apply(RecorderEvent::Stop, at(t0, 20)).unwrap();
        recorder.apply(RecorderEvent::Start, at(t0, 50)).unwrap();

        assert_eq!(recorder.elapsed(at(t0, 55)), Duration::from_secs(25));
    }

    #[test]
    fn test_reset_from_any_state() {
        let t0 = Instant::now();
        for events in [
            vec![],
            vec![RecorderEvent::Start],
            vec![RecorderEvent::Start, RecorderEvent::Pause],
            vec![RecorderEvent::Start, RecorderEvent::Stop],
        ] {
            let mut recorder = Recorder::new();
            for event in events {
                recorder.apply(event, t0).unwrap();
            }
            recorder.append_transcript("Doctor: Hello");

            assert_eq!(recorder.apply(RecorderEvent::Reset, at(t0, 5)), Ok(RecorderState::Idle));
            assert_eq!(recorder.elapsed(at(t0, 10)), Duration::ZERO);
            assert!(recorder.transcript().is_empty());
        }
    }

    #[test]
    fn test_invalid_transitions() {
        let t0 = Instant::now();
        let mut recorder = Recorder::new();

        assert_eq!(
            recorder.apply(RecorderEvent::Pause, t0),
            Err(RecordingError::InvalidTransition {
                from: RecorderState::Idle,
                event: RecorderEvent::Pause,
            })
        );
        assert!(recorder.apply(RecorderEvent::Stop, t0).is_err());
        assert!(recorder.apply(RecorderEvent::Resume, t0).is_err());

        recorder.apply(RecorderEvent::Start, t0).unwrap();
        assert!(recorder.apply(RecorderEvent::Start, t0).is_err());
        assert!(recorder.apply(RecorderEvent::Resume, t0).is_err());

        recorder.apply(RecorderEvent::Pause, t0).unwrap();
        assert!(recorder.apply(RecorderEvent::Pause, t0).is_err());
        assert!(recorder.apply(RecorderEvent::Start, t0).is_err());
        assert_eq!(recorder.state(), RecorderState::Paused);
    }

    #[test]
    fn test_event_parsing() {
        assert_eq!("Pause".parse::<RecorderEvent>(), Ok(RecorderEvent::Pause));
        assert_eq!(
            "rewind".parse::<RecorderEvent>(),
            Err(RecordingError::UnknownEvent("rewind".to_string()))
        );
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00");
        assert_eq!(format_elapsed(Duration::from_millis(65_900)), "01:05");
        assert_eq!(format_elapsed(Duration::from_secs(6_000)), "100:00");
    }
}
