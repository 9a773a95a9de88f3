//! Single-session audio preview state machine.
//!
//! At most one preview plays at a time. The session is bound to the control
//! that started it; that control is the only one in the playing visual state.
//! Playback itself happens in the rendering layer, which reports back through
//! [`AudioSession::on_started`], [`AudioSession::on_ended`] and
//! [`AudioSession::on_failed`] tagged with the session id it was given.

use crate::error::CoreError;
use crate::render::CardId;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long a bound preview may take to report that playback began
pub const START_TIMEOUT: Duration = Duration::from_secs(10);

/// A UI control that can start a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewControl {
    /// Play button on a results card
    Card(CardId),
    /// Play button on a row of a details panel
    DetailRow { panel: u64, row: usize },
}

/// Identifies one started playback; callbacks for older sessions are ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

/// Visual state of a play control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Playing,
    Paused,
}

/// The preview currently bound to a control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePreview {
    pub url: String,
    pub control: PreviewControl,
    pub session: SessionId,
    /// Set once the output confirms playback began
    pub started: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AudioState {
    #[default]
    Idle,
    Playing(ActivePreview),
}

/// Result of a successful toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The same control was pressed again; playback stopped
    Paused { control: PreviewControl },
    /// A new preview was bound, after reverting `previous` if there was one
    Started {
        previous: Option<PreviewControl>,
        preview: ActivePreview,
    },
}

#[derive(Debug, Default)]
pub struct AudioSession {
    state: AudioState,
    next_session: u64,
}

impl AudioSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &AudioState {
        &self.state
    }

    #[must_use]
    pub const fn active(&self) -> Option<&ActivePreview> {
        match &self.state {
            AudioState::Playing(preview) => Some(preview),
            AudioState::Idle => None,
        }
    }

    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, AudioState::Idle)
    }

    /// Visual state `control` should show
    #[must_use]
    pub fn control_state(&self, control: PreviewControl) -> ControlState {
        match &self.state {
            AudioState::Playing(preview) if preview.control == control => ControlState::Playing,
            _ => ControlState::Paused,
        }
    }

    /// Play or pause the preview at `url` for `control`.
    ///
    /// Pressing the control that is already playing the same URL stops it.
    /// Anything else stops the current preview first and binds a new session.
    ///
    /// # Errors
    ///
    /// Returns `AudioUnavailable` when `url` is empty; the state is left unchanged.
    pub fn toggle(&mut self, url: &str, control: PreviewControl) -> Result<ToggleOutcome, CoreError> {
        let url = url.trim();
        if url.is_empty() {
            debug!("Toggle ignored: no preview for {:?}", control);
            return Err(CoreError::AudioUnavailable);
        }

        if let AudioState::Playing(preview) = &self.state {
            if preview.url == url && preview.control == control {
                self.stop();
                return Ok(ToggleOutcome::Paused { control });
            }
        }

        let previous = self.stop();
        self.next_session += 1;
        let preview = ActivePreview {
            url: url.to_string(),
            control,
            session: SessionId(self.next_session),
            started: false,
        };
        info!("Starting preview {} ({:?})", preview.url, preview.session);
        self.state = AudioState::Playing(preview.clone());
        Ok(ToggleOutcome::Started { previous, preview })
    }

    /// Stop whatever is playing, returning the control that reverts to paused
    pub fn stop(&mut self) -> Option<PreviewControl> {
        match std::mem::take(&mut self.state) {
            AudioState::Playing(preview) => {
                info!("Audio stopped ({:?})", preview.session);
                Some(preview.control)
            }
            AudioState::Idle => None,
        }
    }

    /// The output began playing `session`
    pub fn on_started(&mut self, session: SessionId) {
        if let AudioState::Playing(preview) = &mut self.state {
            if preview.session == session {
                preview.started = true;
                return;
            }
        }
        debug!("Ignoring start of stale session {:?}", session);
    }

    /// `session` reached its natural end; returns the control that reverts
    pub fn on_ended(&mut self, session: SessionId) -> Option<PreviewControl> {
        if self.is_current(session) {
            info!("Audio finished ({:?})", session);
            return self.stop();
        }
        debug!("Ignoring end of stale session {:?}", session);
        None
    }

    /// `session` failed to start or decode.
    ///
    /// Returns `None` for stale sessions.
    pub fn on_failed(&mut self, session: SessionId, reason: impl Into<String>) -> Option<CoreError> {
        if !self.is_current(session) {
            debug!("Ignoring failure of stale session {:?}", session);
            return None;
        }
        let reason = reason.into();
        warn!("Error playing audio: {}", reason);
        self.stop();
        Some(CoreError::AudioPlaybackFailed { reason })
    }

    /// [`START_TIMEOUT`] elapsed for `session`.
    ///
    /// A current session that never reported starting is treated as failed;
    /// started or stale sessions are left alone.
    pub fn on_start_timeout(&mut self, session: SessionId) -> Option<CoreError> {
        let stalled = self
            .active()
            .is_some_and(|preview| preview.session == session && !preview.started);
        if stalled {
            return self.on_failed(session, "playback did not start");
        }
        None
    }

    fn is_current(&self, session: SessionId) -> bool {
        self.active().is_some_and(|preview| preview.session == session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: PreviewControl = PreviewControl::Card(CardId(1));
    const Y: PreviewControl = PreviewControl::Card(CardId(2));

    fn session_of(outcome: &ToggleOutcome) -> SessionId {
        match outcome {
            ToggleOutcome::Started { preview, .. } => preview.session,
            ToggleOutcome::Paused { .. } => panic!("expected start"),
        }
    }

    #[test]
    fn test_empty_url_is_unavailable() {
        let mut audio = AudioSession::new();
        assert!(matches!(audio.toggle("", X), Err(CoreError::AudioUnavailable)));
        assert!(audio.is_idle());
    }

    #[test]
    fn test_empty_url_while_playing_keeps_session() {
        let mut audio = AudioSession::new();
        audio.toggle("a.mp3", X).unwrap();
        assert!(audio.toggle("  ", Y).is_err());
        assert_eq!(audio.control_state(X), ControlState::Playing);
    }

    #[test]
    fn test_toggle_twice_returns_to_idle() {
        let mut audio = AudioSession::new();
        audio.toggle("a.mp3", X).unwrap();
        assert_eq!(audio.control_state(X), ControlState::Playing);

        let outcome = audio.toggle("a.mp3", X).unwrap();
        assert_eq!(outcome, ToggleOutcome::Paused { control: X });
        assert!(audio.is_idle());
        assert_eq!(audio.control_state(X), ControlState::Paused);
    }

    #[test]
    fn test_switching_tracks_reverts_previous_control() {
        let mut audio = AudioSession::new();
        audio.toggle("a.mp3", X).unwrap();
        let outcome = audio.toggle("b.mp3", Y).unwrap();

        let ToggleOutcome::Started { previous, preview } = outcome else {
            panic!("expected start");
        };
        assert_eq!(previous, Some(X));
        assert_eq!(preview.url, "b.mp3");
        assert_eq!(preview.control, Y);
        assert_eq!(audio.control_state(X), ControlState::Paused);
        assert_eq!(audio.control_state(Y), ControlState::Playing);
    }

    #[test]
    fn test_same_url_on_other_control_restarts() {
        let mut audio = AudioSession::new();
        let first = session_of(&audio.toggle("a.mp3", X).unwrap());
        let second = session_of(&audio.toggle("a.mp3", Y).unwrap());
        assert_ne!(first, second);
        assert_eq!(audio.active().map(|p| p.control), Some(Y));
    }

    #[test]
    fn test_at_most_one_control_playing() {
        let controls = [
            X,
            Y,
            PreviewControl::DetailRow { panel: 1, row: 0 },
            PreviewControl::DetailRow { panel: 1, row: 1 },
        ];
        let mut audio = AudioSession::new();
        let sequence = [0, 1, 1, 2, 3, 0, 0, 3, 2, 1];
        for (step, &index) in sequence.iter().enumerate() {
            let url = format!("{index}.mp3");
            audio.toggle(&url, controls[index]).unwrap();
            let playing = controls
                .iter()
                .filter(|&&c| audio.control_state(c) == ControlState::Playing)
                .count();
            assert!(playing <= 1, "step {step}: {playing} controls playing");
        }
    }

    #[test]
    fn test_natural_end_reverts_control() {
        let mut audio = AudioSession::new();
        let session = session_of(&audio.toggle("a.mp3", X).unwrap());
        audio.on_started(session);
        assert!(audio.active().unwrap().started);

        assert_eq!(audio.on_ended(session), Some(X));
        assert!(audio.is_idle());
    }

    #[test]
    fn test_stale_callbacks_are_ignored() {
        let mut audio = AudioSession::new();
        let old = session_of(&audio.toggle("a.mp3", X).unwrap());
        audio.toggle("b.mp3", Y).unwrap();

        assert_eq!(audio.on_ended(old), None);
        assert!(audio.on_failed(old, "decode error").is_none());
        audio.on_started(old);
        assert_eq!(audio.control_state(Y), ControlState::Playing);
        assert!(!audio.active().unwrap().started);
    }

    #[test]
    fn test_start_timeout_only_fails_unstarted_current_session() {
        let mut audio = AudioSession::new();
        let old = session_of(&audio.toggle("a.mp3", X).unwrap());
        let current = session_of(&audio.toggle("b.mp3", Y).unwrap());

        assert!(audio.on_start_timeout(old).is_none());
        audio.on_started(current);
        assert!(audio.on_start_timeout(current).is_none());
        assert_eq!(audio.control_state(Y), ControlState::Playing);

        let stalled = session_of(&audio.toggle("c.mp3", X).unwrap());
        assert!(matches!(
            audio.on_start_timeout(stalled),
            Some(CoreError::AudioPlaybackFailed { .. })
        ));
        assert!(audio.is_idle());
    }

    #[test]
    fn test_failure_returns_to_idle() {
        let mut audio = AudioSession::new();
        let session = session_of(&audio.toggle("a.mp3", X).unwrap());
        let error = audio.on_failed(session, "network error");
        assert!(matches!(error, Some(CoreError::AudioPlaybackFailed { .. })));
        assert!(audio.is_idle());
        assert_eq!(audio.control_state(X), ControlState::Paused);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut audio = AudioSession::new();
        assert_eq!(audio.stop(), None);
    }
}
