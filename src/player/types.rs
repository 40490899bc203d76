//! Transport states and the command/event vocabulary shared between the
//! playback session and the media thread.

use std::time::Duration;

use crate::catalog::Track;

/// The play/pause/loading/error status of the currently bound source.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transport {
    /// No track bound.
    Idle,
    /// A source is being fetched/decoded (or nothing could be bound).
    Loading,
    /// Buffered and ready, playback never started.
    Ready,
    Playing,
    Paused,
    /// The bound source failed; playback stays disabled until a new open.
    Errored,
}

impl Default for Transport {
    fn default() -> Self {
        Self::Idle
    }
}

impl Transport {
    pub fn label(&self) -> &'static str {
        match self {
            Transport::Idle => "Stopped",
            Transport::Loading => "Loading",
            Transport::Ready => "Ready",
            Transport::Playing => "Playing",
            Transport::Paused => "Paused",
            Transport::Errored => "Error",
        }
    }
}

/// Command for the media thread.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaCmd {
    /// Bind a new source, superseding any previous binding. Subsequent
    /// events are stamped with `token`.
    Bind {
        source: String,
        volume: f32,
        token: u64,
    },
    /// Request playback; answered with `PlayStarted` or `PlayRejected`.
    Play,
    /// Pause playback immediately.
    Pause,
    /// Move the playhead; the target is already clamped by the session.
    SeekTo(Duration),
    SetVolume(f32),
    /// Release the current source without binding a new one.
    Unbind,
    /// Stop the media thread.
    Shutdown,
}

/// Lifecycle event reported by the media thread.
///
/// `token` identifies the binding the event belongs to; the session
/// discards events from superseded bindings, which is what guarantees a
/// stale source can never mutate session state.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub token: u64,
    pub kind: MediaEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    LoadStarted,
    /// Enough data is buffered to start playback.
    CanPlay,
    /// The authoritative duration became known (or changed).
    DurationChanged(Duration),
    /// Periodic playhead report while playing.
    Position(Duration),
    PlayStarted,
    PlayRejected(String),
    LoadFailed(String),
    /// The source played to its end.
    Ended,
}

/// Notification for the display shell, so it can update any mirrored
/// "now playing" reference.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    TrackChanged(Track),
}
