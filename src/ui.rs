//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, LoginField, Screen, UploadField};
use crate::config::{ControlsSettings, UiSettings};
use crate::player::{PlayerSession, Transport};

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn transport_glyph(transport: Transport) -> &'static str {
    match transport {
        Transport::Playing => "▶",
        Transport::Paused | Transport::Ready => "⏸",
        Transport::Loading => "…",
        Transport::Errored => "✖",
        Transport::Idle => " ",
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn controls_text(screen: Screen, scrub_seconds: u64) -> String {
    match screen {
        Screen::Browse => format!(
            "[j/k] up/down | [enter] play | [space/p] play/pause | [h/l] prev/next | \
             [H/L] scrub -/+{}s | [-/+] volume | [x] close player | [/] search | \
             [i] details | [a] admin | [q] quit",
            scrub_seconds
        ),
        Screen::AdminLogin => {
            "[tab] next field | [enter] login | [esc] back to songs".to_string()
        }
        Screen::Admin => "[tab] next field | [enter] upload | [up/down] select upload | \
             [del] delete upload | [esc] back to songs"
            .to_string(),
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    session: Option<&PlayerSession>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" kirtan ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    match app.screen {
        Screen::Browse => draw_browse(frame, app, chunks[1], ui_settings),
        Screen::AdminLogin => draw_admin_login(frame, app, chunks[1]),
        Screen::Admin => draw_admin(frame, app, chunks[1]),
    }

    draw_player(frame, session, chunks[2]);

    let footer = Paragraph::new(controls_text(app.screen, controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

fn draw_browse(frame: &mut Frame, app: &App, area: Rect, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    // Search box
    let search_text = if app.query.is_empty() && !app.search_mode {
        ui_settings.search_placeholder.clone()
    } else if app.search_mode {
        format!("{}_", app.query)
    } else {
        app.query.clone()
    };
    let search_title = if app.search_mode {
        " search (enter submits, esc cancels) "
    } else {
        " search "
    };
    let search = Paragraph::new(search_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(search_title)
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(search, chunks[0]);

    // Song list
    let now_playing_id = app.now_playing.as_ref().map(|t| t.id.as_str());
    let items: Vec<ListItem> = app
        .songs
        .iter()
        .map(|track| {
            let marker = if Some(track.id.as_str()) == now_playing_id {
                "♪ "
            } else {
                "  "
            };
            let duration = track
                .duration
                .as_deref()
                .map(|d| format!(" [{}]", d))
                .unwrap_or_default();
            ListItem::new(format!("{}{}{}", marker, track.display(), duration))
        })
        .collect();

    let title = if app.loading {
        " songs (loading...) ".to_string()
    } else {
        let connectivity = if app.online { "online" } else { "offline" };
        format!(" songs ({} of {}, {}) ", app.songs.len(), app.total, connectivity)
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if app.has_songs() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);

    if app.detail_open {
        draw_detail(frame, app, chunks[1]);
    }
}

fn draw_detail(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_sized(72, 9, area);
    frame.render_widget(Clear, popup_area);

    let detail = if let Some(track) = app.selected_track() {
        format!(
            "Title: {}\nArtist: {}\nAlbum: {}\nDuration: {}\nCover: {}",
            track.title,
            track.display_name(),
            track.album.as_deref().unwrap_or("-"),
            track.duration.as_deref().unwrap_or("-"),
            track.image_or_placeholder(),
        )
    } else {
        "No song selected".to_string()
    };

    let paragraph = Paragraph::new(detail)
        .block(
            Block::default()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .borders(Borders::ALL)
                .title(" details (i closes) "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

fn draw_player(frame: &mut Frame, session: Option<&PlayerSession>, area: Rect) {
    let text = match session {
        Some(session) => {
            let transport = session.transport();
            match session.current_track() {
                Some(track) => {
                    let time = match session.duration() {
                        Some(total) => format!(
                            "{} / {}",
                            format_mmss(session.position()),
                            format_mmss(total)
                        ),
                        None => format_mmss(session.position()),
                    };
                    let volume = (session.volume() * 100.0).round() as u32;
                    let note = match transport {
                        Transport::Errored => "  •  source failed, pick another song",
                        Transport::Loading => "  •  loading",
                        _ => "",
                    };
                    format!(
                        "{} {}  {} - {}\n{}  •  Vol {}%{}",
                        transport_glyph(transport),
                        transport.label(),
                        track.title,
                        track.display_name(),
                        time,
                        volume,
                        note,
                    )
                }
                None => "Player open, nothing bound".to_string(),
            }
        }
        None => "Nothing playing - press Enter on a song".to_string(),
    };

    let player = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" player ")
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
    );
    frame.render_widget(player, area);
}

fn login_line(label: &str, value: &str, focused: bool, mask: bool) -> String {
    let marker = if focused { "> " } else { "  " };
    let shown = if mask {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    format!("{}{}: {}", marker, label, shown)
}

fn draw_admin_login(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_sized(52, 11, area);

    let mut lines = vec![
        login_line(
            "Username",
            &app.login.username,
            app.login.focus == LoginField::Username,
            false,
        ),
        login_line(
            "Password",
            &app.login.password,
            app.login.focus == LoginField::Password,
            true,
        ),
        String::new(),
    ];
    if let Some(error) = &app.login.error {
        lines.push(format!("! {}", error));
        lines.push(String::new());
    }
    lines.push("Demo credentials: admin / admin123".to_string());

    let form = Paragraph::new(lines.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" admin login ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(form, popup_area);
}

fn draw_admin(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(1)])
        .split(area);

    // Upload form
    let mut lines = vec![
        login_line(
            "Title",
            &app.upload.title,
            app.upload.focus == UploadField::Title,
            false,
        ),
        login_line(
            "Artist",
            &app.upload.artist,
            app.upload.focus == UploadField::Artist,
            false,
        ),
        login_line(
            "File",
            &app.upload.path,
            app.upload.focus == UploadField::Path,
            false,
        ),
    ];
    if let Some(message) = &app.upload.message {
        let prefix = if message.error { "! " } else { "✓ " };
        lines.push(String::new());
        lines.push(format!("{}{}", prefix, message.text));
    }

    let form = Paragraph::new(lines.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" upload audio ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(form, chunks[0]);

    // Uploaded list
    let items: Vec<ListItem> = app
        .uploads
        .iter()
        .map(|upload| {
            ListItem::new(format!(
                "{} - {} ({})  uploaded {}",
                upload.artist,
                upload.title,
                upload.duration,
                upload.uploaded_at.format("%Y-%m-%d"),
            ))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" uploaded audio files ({}) ", app.uploads.len())),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if !app.uploads.is_empty() {
        state.select(Some(app.upload_selected));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);
}
