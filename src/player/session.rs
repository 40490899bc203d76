use std::sync::mpsc::Sender;
use std::time::Duration;

use tracing::warn;

use crate::catalog::Track;

use super::types::{MediaCmd, MediaEvent, MediaEventKind, SessionEvent, Transport};

/// One playback session: a single bound media source, the playlist it was
/// opened from, and the derived transport state.
///
/// The playlist is held by value and never mutated; navigation locates
/// the current track in it by `id`. Volume is session-scoped: it survives
/// track changes and `close`, but not a restart of the app.
pub struct PlayerSession {
    media: Sender<MediaCmd>,
    playlist: Vec<Track>,
    current: Option<Track>,
    transport: Transport,
    position: Duration,
    duration: Option<Duration>,
    volume: f32,
    /// A play request is in flight; the transport flips to Playing only
    /// once the platform confirms it.
    pending_play: bool,
    /// Binding token; bumped on every open/close so events from a
    /// superseded source are discarded.
    token: u64,
}

impl PlayerSession {
    pub fn new(media: Sender<MediaCmd>, volume: f32) -> Self {
        Self {
            media,
            playlist: Vec::new(),
            current: None,
            transport: Transport::Idle,
            position: Duration::ZERO,
            duration: None,
            volume: volume.clamp(0.0, 1.0),
            pending_play: false,
            token: 0,
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn transport(&self) -> Transport {
        self.transport
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    /// Authoritative duration, known only once the source reports it.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    /// Load `track` and remember `playlist` for prev/next navigation.
    pub fn open(&mut self, track: Track, playlist: Vec<Track>) {
        self.playlist = playlist;
        self.bind(track);
    }

    fn bind(&mut self, track: Track) {
        self.token += 1;
        self.position = Duration::ZERO;
        self.duration = None;
        self.pending_play = false;
        self.transport = Transport::Loading;

        if track.url.is_empty() {
            // Nothing to bind, but the previous source must still be
            // released so it cannot keep playing behind an unplayable
            // track. Play stays disallowed until a new open.
            let _ = self.media.send(MediaCmd::Unbind);
        } else {
            let _ = self.media.send(MediaCmd::Bind {
                source: track.url.clone(),
                volume: self.volume,
                token: self.token,
            });
        }

        self.current = Some(track);
    }

    /// Toggle between play and pause.
    ///
    /// Pause applies optimistically. Play is a request: the transport
    /// moves to Playing only on the platform's `PlayStarted` and falls
    /// back to Paused on `PlayRejected`. No-op while Loading/Errored or
    /// when the current track has no source.
    pub fn toggle_play_pause(&mut self) {
        let Some(current) = &self.current else {
            return;
        };
        if current.url.is_empty() {
            return;
        }

        match self.transport {
            Transport::Playing => {
                let _ = self.media.send(MediaCmd::Pause);
                self.pending_play = false;
                self.transport = Transport::Paused;
            }
            Transport::Ready | Transport::Paused => {
                if !self.pending_play {
                    self.pending_play = true;
                    let _ = self.media.send(MediaCmd::Play);
                }
            }
            Transport::Idle | Transport::Loading | Transport::Errored => {}
        }
    }

    /// Move the playhead to `target`, clamped into `[0, duration]`.
    /// No-op until the duration is known.
    pub fn seek(&mut self, target: Duration) {
        let Some(duration) = self.duration else {
            return;
        };
        let Some(current) = &self.current else {
            return;
        };
        if current.url.is_empty() || self.transport == Transport::Errored {
            return;
        }

        let clamped = target.min(duration);
        self.position = clamped;
        let _ = self.media.send(MediaCmd::SeekTo(clamped));
    }

    /// Scrub relative to the current position (negative = backwards).
    pub fn seek_by(&mut self, delta_secs: i64) {
        let target = if delta_secs >= 0 {
            self.position.saturating_add(Duration::from_secs(delta_secs as u64))
        } else {
            self.position
                .saturating_sub(Duration::from_secs(delta_secs.unsigned_abs()))
        };
        self.seek(target);
    }

    /// Set the session volume, clamped into `[0, 1]`. Applies to the
    /// current source immediately and to every subsequent open.
    pub fn set_volume(&mut self, level: f32) {
        self.volume = level.clamp(0.0, 1.0);
        let _ = self.media.send(MediaCmd::SetVolume(self.volume));
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        self.set_volume(self.volume + delta);
    }

    fn current_index(&self) -> Option<usize> {
        let current = self.current.as_ref()?;
        self.playlist.iter().position(|t| t.id == current.id)
    }

    /// Open the previous playlist entry. No-op at the first track (no
    /// wraparound); returns the newly opened track otherwise.
    pub fn play_previous(&mut self) -> Option<Track> {
        let index = self.current_index()?;
        if index == 0 {
            return None;
        }
        let track = self.playlist[index - 1].clone();
        self.bind(track.clone());
        Some(track)
    }

    /// Open the next playlist entry. No-op at the last track.
    pub fn play_next(&mut self) -> Option<Track> {
        let index = self.current_index()?;
        let track = self.playlist.get(index + 1)?.clone();
        self.bind(track.clone());
        Some(track)
    }

    /// Release the media source and reset every transport field to its
    /// default. The session volume is kept.
    pub fn close(&mut self) {
        self.token += 1;
        let _ = self.media.send(MediaCmd::Unbind);
        self.current = None;
        self.playlist.clear();
        self.transport = Transport::Idle;
        self.position = Duration::ZERO;
        self.duration = None;
        self.pending_play = false;
    }

    /// Apply one media event. Events stamped with the token of a
    /// superseded binding are discarded. Returns a shell notification
    /// when the event caused a track change (auto-advance).
    pub fn handle_event(&mut self, event: MediaEvent) -> Option<SessionEvent> {
        if event.token != self.token {
            return None;
        }

        match event.kind {
            MediaEventKind::LoadStarted => {
                self.transport = Transport::Loading;
                None
            }
            MediaEventKind::CanPlay => {
                if self.transport == Transport::Loading {
                    self.transport = Transport::Ready;
                }
                None
            }
            MediaEventKind::DurationChanged(duration) => {
                self.duration = Some(duration);
                self.position = self.position.min(duration);
                None
            }
            MediaEventKind::Position(position) => {
                self.position = match self.duration {
                    Some(duration) => position.min(duration),
                    None => position,
                };
                None
            }
            MediaEventKind::PlayStarted => {
                self.pending_play = false;
                self.transport = Transport::Playing;
                None
            }
            MediaEventKind::PlayRejected(reason) => {
                warn!(%reason, "platform rejected play request");
                self.pending_play = false;
                self.transport = Transport::Paused;
                None
            }
            MediaEventKind::LoadFailed(reason) => {
                warn!(%reason, "media source failed to load");
                self.pending_play = false;
                self.transport = Transport::Errored;
                None
            }
            MediaEventKind::Ended => {
                self.transport = Transport::Paused;
                if let Some(duration) = self.duration {
                    self.position = duration;
                }
                // Auto-advance; at the tail playback simply stops.
                self.play_next().map(SessionEvent::TrackChanged)
            }
        }
    }
}
