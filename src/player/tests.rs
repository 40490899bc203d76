use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use super::*;
use crate::catalog::Track;

fn t(id: &str) -> Track {
    Track {
        id: id.into(),
        title: format!("Track {id}"),
        subtitle: "Artist".into(),
        image: String::new(),
        url: format!("https://example.com/{id}.mp3"),
        duration: None,
        artist: Some("Artist".into()),
        album: None,
    }
}

fn silent(id: &str) -> Track {
    let mut track = t(id);
    track.url = String::new();
    track
}

fn session() -> (PlayerSession, Receiver<MediaCmd>) {
    let (tx, rx) = mpsc::channel();
    (PlayerSession::new(tx, 1.0), rx)
}

fn drain(rx: &Receiver<MediaCmd>) -> Vec<MediaCmd> {
    let mut cmds = Vec::new();
    while let Ok(cmd) = rx.try_recv() {
        cmds.push(cmd);
    }
    cmds
}

/// Token of the most recent `Bind` in a command batch.
fn bound_token(cmds: &[MediaCmd]) -> u64 {
    cmds.iter()
        .rev()
        .find_map(|cmd| match cmd {
            MediaCmd::Bind { token, .. } => Some(*token),
            _ => None,
        })
        .expect("no bind issued")
}

fn ev(token: u64, kind: MediaEventKind) -> MediaEvent {
    MediaEvent { token, kind }
}

#[test]
fn open_binds_source_and_enters_loading() {
    let (mut s, rx) = session();
    s.open(t("a"), vec![t("a"), t("b")]);

    assert_eq!(s.transport(), Transport::Loading);
    assert_eq!(s.position(), Duration::ZERO);
    assert_eq!(s.duration(), None);
    assert_eq!(s.current_track().map(|t| t.id.as_str()), Some("a"));

    let cmds = drain(&rx);
    assert!(matches!(
        cmds.as_slice(),
        [MediaCmd::Bind { source, .. }] if source == "https://example.com/a.mp3"
    ));
}

#[test]
fn toggle_on_empty_url_is_a_noop() {
    let (mut s, rx) = session();
    s.open(silent("a"), vec![silent("a")]);

    // The previous binding is released, nothing new is bound.
    assert_eq!(drain(&rx), vec![MediaCmd::Unbind]);
    let before = s.transport();

    s.toggle_play_pause();
    assert_eq!(s.transport(), before);
    assert!(drain(&rx).is_empty());
}

#[test]
fn open_then_close_yields_idle_defaults() {
    let (mut s, rx) = session();
    s.open(t("a"), vec![t("a")]);
    let token = bound_token(&drain(&rx));
    s.handle_event(ev(token, MediaEventKind::DurationChanged(Duration::from_secs(90))));
    s.handle_event(ev(token, MediaEventKind::Position(Duration::from_secs(12))));

    s.close();

    assert_eq!(s.transport(), Transport::Idle);
    assert!(s.current_track().is_none());
    assert!(s.playlist().is_empty());
    assert_eq!(s.position(), Duration::ZERO);
    assert_eq!(s.duration(), None);
    assert_eq!(drain(&rx), vec![MediaCmd::Unbind]);
}

#[test]
fn navigation_noops_at_playlist_boundaries() {
    let playlist = vec![t("a"), t("b"), t("c")];

    let (mut s, rx) = session();
    s.open(playlist[0].clone(), playlist.clone());
    drain(&rx);
    assert_eq!(s.play_previous(), None);
    assert!(drain(&rx).is_empty());

    s.open(playlist[2].clone(), playlist);
    drain(&rx);
    assert_eq!(s.play_next(), None);
    assert!(drain(&rx).is_empty());
}

#[test]
fn next_and_previous_bind_the_adjacent_track() {
    let playlist = vec![t("a"), t("b"), t("c")];
    let (mut s, rx) = session();
    s.open(playlist[1].clone(), playlist);
    drain(&rx);

    let next = s.play_next().expect("should advance");
    assert_eq!(next.id, "c");
    let cmds = drain(&rx);
    assert!(matches!(
        cmds.as_slice(),
        [MediaCmd::Bind { source, .. }] if source == "https://example.com/c.mp3"
    ));

    let prev = s.play_previous().expect("should go back");
    assert_eq!(prev.id, "b");
}

#[test]
fn ended_advances_through_the_playlist_then_stops() {
    let playlist = vec![t("a"), t("b"), t("c")];
    let (mut s, rx) = session();
    s.open(playlist[0].clone(), playlist);
    let token_a = bound_token(&drain(&rx));

    // a ends -> b opens and the shell is notified.
    let notice = s.handle_event(ev(token_a, MediaEventKind::Ended));
    assert!(matches!(notice, Some(SessionEvent::TrackChanged(ref t)) if t.id == "b"));
    assert_eq!(s.transport(), Transport::Loading);
    let token_b = bound_token(&drain(&rx));

    // b ends -> c opens.
    let notice = s.handle_event(ev(token_b, MediaEventKind::Ended));
    assert!(matches!(notice, Some(SessionEvent::TrackChanged(ref t)) if t.id == "c"));
    let token_c = bound_token(&drain(&rx));

    // c ends -> no next track, playback stops without error.
    let notice = s.handle_event(ev(token_c, MediaEventKind::Ended));
    assert_eq!(notice, None);
    assert_eq!(s.transport(), Transport::Paused);
    assert_eq!(s.current_track().map(|t| t.id.as_str()), Some("c"));
    assert!(drain(&rx).is_empty());
}

#[test]
fn volume_persists_across_track_changes() {
    let (mut s, rx) = session();
    s.open(t("a"), vec![t("a"), t("b")]);
    drain(&rx);

    s.set_volume(0.3);
    assert_eq!(drain(&rx), vec![MediaCmd::SetVolume(0.3)]);

    s.open(t("b"), vec![t("a"), t("b")]);
    let cmds = drain(&rx);
    assert!(matches!(
        cmds.as_slice(),
        [MediaCmd::Bind { volume, .. }] if (*volume - 0.3).abs() < f32::EPSILON
    ));
    assert_eq!(s.volume(), 0.3);
}

#[test]
fn volume_is_clamped_into_unit_range() {
    let (mut s, _rx) = session();
    s.set_volume(3.5);
    assert_eq!(s.volume(), 1.0);
    s.set_volume(-1.0);
    assert_eq!(s.volume(), 0.0);
    s.adjust_volume(0.05);
    assert_eq!(s.volume(), 0.05);
}

#[test]
fn seek_clamps_into_known_duration() {
    let (mut s, rx) = session();
    s.open(t("a"), vec![t("a")]);
    let token = bound_token(&drain(&rx));

    // Before the duration is known seeking is a no-op.
    s.seek(Duration::from_secs(10));
    assert!(drain(&rx).is_empty());
    assert_eq!(s.position(), Duration::ZERO);

    s.handle_event(ev(token, MediaEventKind::DurationChanged(Duration::from_secs(100))));

    s.seek(Duration::from_secs(250));
    assert_eq!(s.position(), Duration::from_secs(100));
    assert_eq!(drain(&rx), vec![MediaCmd::SeekTo(Duration::from_secs(100))]);

    s.seek(Duration::from_secs(40));
    assert_eq!(s.position(), Duration::from_secs(40));

    // Relative scrub saturates at zero instead of going negative.
    s.seek_by(-90);
    assert_eq!(s.position(), Duration::ZERO);
}

#[test]
fn play_confirms_only_on_platform_ack() {
    let (mut s, rx) = session();
    s.open(t("a"), vec![t("a")]);
    let token = bound_token(&drain(&rx));

    s.handle_event(ev(token, MediaEventKind::CanPlay));
    assert_eq!(s.transport(), Transport::Ready);

    // The request goes out but the state does not flip yet.
    s.toggle_play_pause();
    assert_eq!(s.transport(), Transport::Ready);
    assert_eq!(drain(&rx), vec![MediaCmd::Play]);

    // A second toggle while the request is in flight does not resend.
    s.toggle_play_pause();
    assert!(drain(&rx).is_empty());

    s.handle_event(ev(token, MediaEventKind::PlayStarted));
    assert_eq!(s.transport(), Transport::Playing);

    // Pause is optimistic and immediate.
    s.toggle_play_pause();
    assert_eq!(s.transport(), Transport::Paused);
    assert_eq!(drain(&rx), vec![MediaCmd::Pause]);
}

#[test]
fn rejected_play_reconciles_to_paused() {
    let (mut s, rx) = session();
    s.open(t("a"), vec![t("a")]);
    let token = bound_token(&drain(&rx));
    s.handle_event(ev(token, MediaEventKind::CanPlay));

    s.toggle_play_pause();
    drain(&rx);
    s.handle_event(ev(token, MediaEventKind::PlayRejected("autoplay blocked".into())));

    assert_eq!(s.transport(), Transport::Paused);

    // The intent was cleared, so the next toggle re-requests play.
    s.toggle_play_pause();
    assert_eq!(drain(&rx), vec![MediaCmd::Play]);
}

#[test]
fn load_failure_disables_playback_until_reopened() {
    let (mut s, rx) = session();
    s.open(t("a"), vec![t("a")]);
    let token = bound_token(&drain(&rx));

    s.handle_event(ev(token, MediaEventKind::LoadFailed("404".into())));
    assert_eq!(s.transport(), Transport::Errored);

    s.toggle_play_pause();
    s.seek(Duration::from_secs(1));
    assert!(drain(&rx).is_empty());

    // A new open clears the error.
    s.open(t("a"), vec![t("a")]);
    assert_eq!(s.transport(), Transport::Loading);
    assert_eq!(bound_token(&drain(&rx)), token + 1);
}

#[test]
fn stale_events_from_superseded_bindings_are_discarded() {
    let playlist = vec![t("a"), t("b"), t("c")];
    let (mut s, rx) = session();
    s.open(playlist[0].clone(), playlist.clone());
    let token_a = bound_token(&drain(&rx));

    s.open(playlist[1].clone(), playlist);
    drain(&rx);

    // The old source's Ended must not trigger an advance.
    assert_eq!(s.handle_event(ev(token_a, MediaEventKind::Ended)), None);
    assert_eq!(s.transport(), Transport::Loading);
    assert_eq!(s.current_track().map(|t| t.id.as_str()), Some("b"));
    assert!(drain(&rx).is_empty());
}

#[test]
fn close_acts_as_a_stale_event_barrier() {
    let (mut s, rx) = session();
    s.open(t("a"), vec![t("a")]);
    let token = bound_token(&drain(&rx));

    s.close();
    assert_eq!(s.handle_event(ev(token, MediaEventKind::PlayStarted)), None);
    assert_eq!(s.transport(), Transport::Idle);
}

#[test]
fn position_reports_apply_and_clamp() {
    let (mut s, rx) = session();
    s.open(t("a"), vec![t("a")]);
    let token = bound_token(&drain(&rx));

    s.handle_event(ev(token, MediaEventKind::DurationChanged(Duration::from_secs(100))));
    s.handle_event(ev(token, MediaEventKind::Position(Duration::from_secs(50))));
    assert_eq!(s.position(), Duration::from_secs(50));

    // A report past the end clamps to the duration.
    s.handle_event(ev(token, MediaEventKind::Position(Duration::from_secs(150))));
    assert_eq!(s.position(), Duration::from_secs(100));
}

#[test]
fn opening_a_new_track_resets_position() {
    let (mut s, rx) = session();
    s.open(t("a"), vec![t("a"), t("b")]);
    let token = bound_token(&drain(&rx));
    s.handle_event(ev(token, MediaEventKind::Position(Duration::from_secs(30))));

    s.open(t("b"), vec![t("a"), t("b")]);
    assert_eq!(s.position(), Duration::ZERO);
    assert_eq!(s.duration(), None);
    assert_eq!(s.transport(), Transport::Loading);
}
