use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{RecordingError, RecordingResult};
use crate::recorder::{format_elapsed, Recorder, RecorderEvent, RecorderState};
use crate::transcription::live_opening_line;

/// Sessions that see no event for this long are dropped
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// Point-in-time view of a recording session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub recording_id: Uuid,
    pub state: RecorderState,
    pub elapsed_seconds: u64,
    /// Elapsed time as `MM:SS`
    pub elapsed: String,
    /// Live transcript shown while recording
    pub transcript: String,
    pub opened_at: DateTime<Utc>,
}

#[derive(Debug)]
struct RecordingSession {
    owner: Uuid,
    recorder: Recorder,
    opened_at: DateTime<Utc>,
    last_event_at: Instant,
}

impl RecordingSession {
    fn snapshot(&self, recording_id: Uuid, now: Instant) -> SessionSnapshot {
        let elapsed = self.recorder.elapsed(now);
        SessionSnapshot {
            recording_id,
            state: self.recorder.state(),
            elapsed_seconds: elapsed.as_secs(),
            elapsed: format_elapsed(elapsed),
            transcript: self.recorder.transcript().to_string(),
            opened_at: self.opened_at,
        }
    }
}

/// Active recorders, one per recording
///
/// A session belonging to another user is reported as missing. Sessions
/// end when the recording is processed, or are evicted once they have seen
/// no event for the idle TTL.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, RecordingSession>>,
    idle_ttl: Duration,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::with_idle_ttl(DEFAULT_IDLE_TTL)
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Open an idle session, or return the existing one
    pub async fn open(&self, recording_id: Uuid, owner: Uuid, now: Instant) -> RecordingResult<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        Self::evict(&mut sessions, now, self.idle_ttl);

        let session = sessions.entry(recording_id).or_insert_with(|| {
            debug!(%recording_id, "Opening recording session");
            RecordingSession {
                owner,
                recorder: Recorder::new(),
                opened_at: Utc::now(),
                last_event_at: now,
            }
        });

        if session.owner != owner {
            return Err(RecordingError::SessionNotFound(recording_id));
        }
        Ok(session.snapshot(recording_id, now))
    }

    /// Apply a recorder event, opening the session first if needed
    ///
    /// Starting a recorder with an empty transcript seeds it with the opening
    /// line of the consultation.
    pub async fn apply(
        &self,
        recording_id: Uuid,
        owner: Uuid,
        event: RecorderEvent,
        now: Instant,
    ) -> RecordingResult<SessionSnapshot> {
        self.open(recording_id, owner, now).await?;

        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&recording_id)
            .filter(|s| s.owner == owner)
            .ok_or(RecordingError::SessionNotFound(recording_id))?;

        let from = session.recorder.state();
        let to = session.recorder.apply(event, now)?;
        session.last_event_at = now;
        if event == RecorderEvent::Start && session.recorder.transcript().is_empty() {
            session.recorder.append_transcript(live_opening_line());
        }
        info!(%recording_id, %event, %from, %to, "Recorder transition");

        Ok(session.snapshot(recording_id, now))
    }

    pub async fn snapshot(&self, recording_id: Uuid, owner: Uuid, now: Instant) -> RecordingResult<SessionSnapshot> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&recording_id)
            .filter(|s| s.owner == owner)
            .map(|s| s.snapshot(recording_id, now))
            .ok_or(RecordingError::SessionNotFound(recording_id))
    }

    /// Remove the session and return its final snapshot
    pub async fn close(&self, recording_id: Uuid, owner: Uuid, now: Instant) -> RecordingResult<SessionSnapshot> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&recording_id) {
            Some(session) if session.owner == owner => {
                let snapshot = session.snapshot(recording_id, now);
                sessions.remove(&recording_id);
                debug!(%recording_id, elapsed = %snapshot.elapsed, "Closed recording session");
                Ok(snapshot)
            }
            _ => Err(RecordingError::SessionNotFound(recording_id)),
        }
    }

    /// Drop every session idle for at least the TTL; returns how many went
    pub async fn evict_idle(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::evict(&mut sessions, now, self.idle_ttl)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn evict(sessions: &mut HashMap<Uuid, RecordingSession>, now: Instant, ttl: Duration) -> usize {
        let before = sessions.len();
        sessions.retain(|recording_id, session| {
            let keep = now.saturating_duration_since(session.last_event_at) < ttl;
            if !keep {
                debug!(%recording_id, state = %session.recorder.state(), "Evicting idle recording session");
            }
            keep
        });
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_apply_opens_session() {
        let registry = SessionRegistry::new();
        let (recording, owner, t0) = (Uuid::new_v4(), Uuid::new_v4(), Instant::now());

        let snapshot = registry
            .apply(recording, owner, RecorderEvent::Start, t0)
            .await
            .unwrap();
        assert_eq!(snapshot.state, RecorderState::Recording);

        let snapshot = registry
            .snapshot(recording, owner, t0 + Duration::from_secs(61))
            .await
            .unwrap();
        assert_eq!(snapshot.elapsed_seconds, 61);
        assert_eq!(snapshot.elapsed, "01:01");
    }

    #[tokio::test]
    async fn test_other_owner_cannot_see_session() {
        let registry = SessionRegistry::new();
        let (recording, owner, t0) = (Uuid::new_v4(), Uuid::new_v4(), Instant::now());
        registry.open(recording, owner, t0).await.unwrap();

        let intruder = Uuid::new_v4();
        assert_eq!(
            registry.snapshot(recording, intruder, t0).await,
            Err(RecordingError::SessionNotFound(recording))
        );
        assert!(registry
            .apply(recording, intruder, RecorderEvent::Start, t0)
            .await
            .is_err());
        assert!(registry.close(recording, intruder, t0).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_transition_leaves_state() {
        let registry = SessionRegistry::new();
        let (recording, owner, t0) = (Uuid::new_v4(), Uuid::new_v4(), Instant::now());

        let err = registry
            .apply(recording, owner, RecorderEvent::Resume, t0)
            .await
            .unwrap_err();
        assert!(matches!(err, RecordingError::InvalidTransition { .. }));

        let snapshot = registry.snapshot(recording, owner, t0).await.unwrap();
        assert_eq!(snapshot.state, RecorderState::Idle);
    }

    #[test]
    fn test_close_removes_session() {
        tokio_test::block_on(async {
            let registry = SessionRegistry::new();
            let (recording, owner, t0) = (Uuid::new_v4(), Uuid::new_v4(), Instant::now());
            registry.apply(recording, owner, RecorderEvent::Start, t0).await.unwrap();

            let last = registry
                .close(recording, owner, t0 + Duration::from_secs(5))
                .await
                .unwrap();
            assert_eq!(last.elapsed, "00:05");
            assert!(registry.is_empty().await);
        });
    }

    #[tokio::test]
    async fn test_start_seeds_live_transcript_and_reset_clears_it() {
        let registry = SessionRegistry::new();
        let (recording, owner, t0) = (Uuid::new_v4(), Uuid::new_v4(), Instant::now());

        let started = registry
            .apply(recording, owner, RecorderEvent::Start, t0)
            .await
            .unwrap();
        assert_eq!(started.transcript, "Doctor: Good morning, how are you feeling today?");

        registry.apply(recording, owner, RecorderEvent::Stop, t0).await.unwrap();
        let restarted = registry
            .apply(recording, owner, RecorderEvent::Start, t0)
            .await
            .unwrap();
        assert_eq!(restarted.transcript, started.transcript);

        let reset = registry
            .apply(recording, owner, RecorderEvent::Reset, t0 + Duration::from_secs(3))
            .await
            .unwrap();
        assert_eq!(reset.state, RecorderState::Idle);
        assert!(reset.transcript.is_empty());
        assert_eq!(reset.elapsed_seconds, 0);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_evicted() {
        let registry = SessionRegistry::with_idle_ttl(Duration::from_secs(60));
        let (stale, fresh, owner, t0) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Instant::now());

        registry.open(stale, owner, t0).await.unwrap();
        registry
            .apply(fresh, owner, RecorderEvent::Start, t0 + Duration::from_secs(30))
            .await
            .unwrap();

        assert_eq!(registry.evict_idle(t0 + Duration::from_secs(59)).await, 0);
        assert_eq!(registry.evict_idle(t0 + Duration::from_secs(60)).await, 1);
        assert_eq!(
            registry.snapshot(stale, owner, t0).await,
            Err(RecordingError::SessionNotFound(stale))
        );
        assert!(registry.snapshot(fresh, owner, t0).await.is_ok());
    }

    #[tokio::test]
    async fn test_opening_a_session_sweeps_stale_ones() {
        let registry = SessionRegistry::with_idle_ttl(Duration::from_secs(60));
        let (abandoned, next, owner, t0) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Instant::now());

        registry.open(abandoned, owner, t0).await.unwrap();
        registry.open(next, owner, t0 + Duration::from_secs(120)).await.unwrap();

        assert_eq!(registry.len().await, 1);
        assert!(registry.snapshot(next, owner, t0).await.is_ok());
    }
}
