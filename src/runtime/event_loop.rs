use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::admin::{self, UploadStore};
use crate::app::{App, FormMessage, Screen};
use crate::catalog::{CatalogUpdate, CatalogWorker};
use crate::config;
use crate::media::Media;
use crate::player::{PlayerSession, SessionEvent};
use crate::ui;

/// The mounted player: the media thread plus the session driving it.
/// Created on the first play and torn down when the player is closed.
pub struct ActivePlayer {
    pub media: Media,
    pub session: PlayerSession,
}

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    pub player: Option<ActivePlayer>,
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            player: None,
            pending_gg: false,
        }
    }
}

/// Main terminal event loop: handles input, UI drawing and the sync with
/// the catalog worker and the media thread. Returns `Ok(())` when
/// shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    catalog: &CatalogWorker,
    store: Option<&UploadStore>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Apply finished catalog lookups.
        while let Some(update) = catalog.try_update() {
            let update = merge_custom_tracks(update, app, store);
            app.apply_catalog_update(update);
        }

        // Drain media events into the session; auto-advance surfaces here
        // as a track-change notification for the shell.
        if let Some(player) = state.player.as_mut() {
            while let Some(event) = player.media.try_event() {
                if let Some(SessionEvent::TrackChanged(track)) = player.session.handle_event(event)
                {
                    app.now_playing = Some(track);
                }
            }
        }

        let session = state.player.as_ref().map(|p| &p.session);
        terminal.draw(|f| ui::draw(f, app, session, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, catalog, store, state)? {
                    break;
                }
            }
        }
    }

    if let Some(player) = state.player.take() {
        player.media.shutdown();
    }

    Ok(())
}

/// Put custom (uploaded) tracks ahead of the home list, newest first.
/// Search results are left untouched.
fn merge_custom_tracks(
    update: CatalogUpdate,
    app: &App,
    store: Option<&UploadStore>,
) -> CatalogUpdate {
    if !app.query.trim().is_empty() {
        return update;
    }
    let Some(store) = store else {
        return update;
    };

    let mut tracks = store.custom_tracks();
    let added = tracks.len();
    tracks.extend(update.tracks);

    CatalogUpdate {
        total: update.total + added,
        tracks,
        offline: update.offline,
    }
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    catalog: &CatalogWorker,
    store: Option<&UploadStore>,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    match app.screen {
        Screen::Browse if app.search_mode => handle_search_key(key, app, catalog),
        Screen::Browse => return handle_browse_key(key, settings, app, catalog, state),
        Screen::AdminLogin => handle_login_key(key, app, store),
        Screen::Admin => handle_admin_key(key, app, catalog, store),
    }

    Ok(false)
}

fn handle_search_key(key: KeyEvent, app: &mut App, catalog: &CatalogWorker) {
    match key.code {
        KeyCode::Esc => app.exit_search_mode(),
        KeyCode::Backspace => app.pop_query_char(),
        KeyCode::Enter => {
            app.exit_search_mode();
            app.loading = true;
            catalog.request(app.query.clone());
        }
        KeyCode::Char(c) => {
            if !c.is_control() {
                app.push_query_char(c);
            }
        }
        _ => {}
    }
}

fn handle_browse_key(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    catalog: &CatalogWorker,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            if let Some(player) = state.player.take() {
                player.media.shutdown();
            }
            return Ok(true);
        }
        KeyCode::Char('/') => {
            state.pending_gg = false;
            app.enter_search_mode();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.select_last();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            if let Some(track) = app.selected_track().cloned() {
                let player = state.player.get_or_insert_with(|| {
                    let media = Media::start();
                    let session = PlayerSession::new(media.sender(), settings.playback.volume);
                    ActivePlayer { media, session }
                });
                player.session.open(track.clone(), app.songs.clone());
                app.now_playing = Some(track);
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            state.pending_gg = false;
            if let Some(player) = state.player.as_mut() {
                player.session.toggle_play_pause();
            }
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            if let Some(player) = state.player.as_mut() {
                if let Some(track) = player.session.play_previous() {
                    app.now_playing = Some(track);
                }
            }
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            if let Some(player) = state.player.as_mut() {
                if let Some(track) = player.session.play_next() {
                    app.now_playing = Some(track);
                }
            }
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            if let Some(player) = state.player.as_mut() {
                let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
                player.session.seek_by(-secs);
            }
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            if let Some(player) = state.player.as_mut() {
                let secs = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
                player.session.seek_by(secs);
            }
        }
        KeyCode::Char('-') => {
            state.pending_gg = false;
            if let Some(player) = state.player.as_mut() {
                player.session.adjust_volume(-settings.controls.volume_step);
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.pending_gg = false;
            if let Some(player) = state.player.as_mut() {
                player.session.adjust_volume(settings.controls.volume_step);
            }
        }
        KeyCode::Char('x') => {
            state.pending_gg = false;
            if let Some(mut player) = state.player.take() {
                player.session.close();
                player.media.shutdown();
            }
            app.now_playing = None;
        }
        KeyCode::Char('i') => {
            state.pending_gg = false;
            app.toggle_detail();
        }
        KeyCode::Char('a') => {
            state.pending_gg = false;
            app.open_admin_login();
        }
        KeyCode::Char('r') => {
            state.pending_gg = false;
            app.loading = true;
            catalog.request(app.query.clone());
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    Ok(false)
}

fn handle_login_key(key: KeyEvent, app: &mut App, store: Option<&UploadStore>) {
    match key.code {
        KeyCode::Esc => app.leave_admin(),
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => app.login_focus_next(),
        KeyCode::Backspace => {
            app.login_input_mut().pop();
        }
        KeyCode::Enter => {
            let username = app.login.username.trim().to_string();
            let password = app.login.password.trim().to_string();

            if username.is_empty() || password.is_empty() {
                app.login.error = Some("Please fill in all fields".to_string());
            } else if admin::verify(&username, &password) {
                let uploads = store.map(|s| s.uploads()).unwrap_or_default();
                app.enter_admin(uploads);
                if store.is_none() {
                    app.upload.message =
                        Some(FormMessage::error("Upload storage is unavailable"));
                }
            } else {
                app.login.error = Some("Invalid username or password".to_string());
            }
        }
        KeyCode::Char(c) => {
            if !c.is_control() {
                app.login_input_mut().push(c);
            }
        }
        _ => {}
    }
}

fn handle_admin_key(
    key: KeyEvent,
    app: &mut App,
    catalog: &CatalogWorker,
    store: Option<&UploadStore>,
) {
    match key.code {
        KeyCode::Esc => {
            app.leave_admin();
            // Refresh the home list so new uploads show up in browse.
            if app.query.trim().is_empty() {
                app.loading = true;
                catalog.request("");
            }
        }
        KeyCode::Tab => app.upload_focus_next(),
        KeyCode::Down => app.upload_next(),
        KeyCode::Up => app.upload_prev(),
        KeyCode::Delete => {
            let selected = app.selected_upload().cloned();
            if let (Some(store), Some(upload)) = (store, selected) {
                match store.remove(&upload.id) {
                    Ok(()) => {
                        app.set_uploads(store.uploads());
                        app.upload.message =
                            Some(FormMessage::success("Audio deleted successfully!"));
                    }
                    Err(e) => {
                        app.upload.message =
                            Some(FormMessage::error(format!("Delete failed: {e}")));
                    }
                }
            }
        }
        KeyCode::Enter => submit_upload(app, store),
        KeyCode::Backspace => {
            app.upload_input_mut().pop();
        }
        KeyCode::Char(c) => {
            if !c.is_control() {
                app.upload_input_mut().push(c);
            }
        }
        _ => {}
    }
}

fn submit_upload(app: &mut App, store: Option<&UploadStore>) {
    let title = app.upload.title.trim().to_string();
    let artist = app.upload.artist.trim().to_string();
    let path = app.upload.path.trim().to_string();

    if title.is_empty() || artist.is_empty() || path.is_empty() {
        app.upload.message = Some(FormMessage::error(
            "Please fill in all fields and select an audio file",
        ));
        return;
    }

    let Some(store) = store else {
        app.upload.message = Some(FormMessage::error("Upload storage is unavailable"));
        return;
    };

    match store.add(&title, &artist, Path::new(&path)) {
        Ok(_) => {
            app.upload.title.clear();
            app.upload.artist.clear();
            app.upload.path.clear();
            app.set_uploads(store.uploads());
            app.upload.message = Some(FormMessage::success("Audio uploaded successfully!"));
        }
        Err(e) => {
            app.upload.message = Some(FormMessage::error(format!("Upload failed: {e}")));
        }
    }
}
