use super::*;
use crate::catalog::{CatalogUpdate, Track};

fn t(id: &str) -> Track {
    Track {
        id: id.into(),
        title: id.to_uppercase(),
        subtitle: "Artist".into(),
        image: String::new(),
        url: format!("https://example.com/{id}.mp3"),
        duration: None,
        artist: None,
        album: None,
    }
}

fn update(ids: &[&str], offline: bool) -> CatalogUpdate {
    let tracks: Vec<Track> = ids.iter().map(|id| t(id)).collect();
    CatalogUpdate {
        total: tracks.len(),
        tracks,
        offline,
    }
}

#[test]
fn catalog_update_resets_selection_and_loading() {
    let mut app = App::new();
    assert!(app.loading);

    app.selected = 7;
    app.apply_catalog_update(update(&["a", "b"], false));

    assert_eq!(app.selected, 0);
    assert!(!app.loading);
    assert!(app.online);
    assert_eq!(app.songs.len(), 2);
    assert_eq!(app.total, 2);
}

#[test]
fn offline_update_clears_the_online_flag() {
    let mut app = App::new();
    app.apply_catalog_update(update(&["a"], true));
    assert!(!app.online);

    app.apply_catalog_update(update(&["a"], false));
    assert!(app.online);
}

#[test]
fn selection_wraps_both_directions() {
    let mut app = App::new();
    app.apply_catalog_update(update(&["a", "b", "c"], false));

    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.next();
    assert_eq!(app.selected, 1);

    app.select_last();
    assert_eq!(app.selected, 2);
    app.select_first();
    assert_eq!(app.selected, 0);
}

#[test]
fn selection_is_safe_on_an_empty_list() {
    let mut app = App::new();
    app.next();
    app.prev();
    app.select_last();
    assert_eq!(app.selected, 0);
    assert!(app.selected_track().is_none());
}

#[test]
fn search_mode_edits_the_query() {
    let mut app = App::new();
    app.enter_search_mode();
    assert!(app.search_mode);

    app.push_query_char('r');
    app.push_query_char('a');
    app.push_query_char('m');
    assert_eq!(app.query, "ram");

    app.pop_query_char();
    assert_eq!(app.query, "ra");

    app.exit_search_mode();
    assert!(!app.search_mode);
    // The typed query is kept for the next search.
    assert_eq!(app.query, "ra");
}

#[test]
fn admin_login_flow_resets_forms() {
    let mut app = App::new();
    app.open_admin_login();
    assert_eq!(app.screen, Screen::AdminLogin);
    assert_eq!(app.login.focus, LoginField::Username);

    app.login_input_mut().push_str("admin");
    app.login_focus_next();
    app.login_input_mut().push_str("secret");
    assert_eq!(app.login.username, "admin");
    assert_eq!(app.login.password, "secret");

    app.login_focus_next();
    assert_eq!(app.login.focus, LoginField::Username);

    app.enter_admin(Vec::new());
    assert_eq!(app.screen, Screen::Admin);
    assert_eq!(app.upload.focus, UploadField::Title);

    app.leave_admin();
    assert_eq!(app.screen, Screen::Browse);
    assert!(app.login.username.is_empty());
    assert!(app.login.password.is_empty());
}

#[test]
fn upload_focus_cycles_through_all_fields() {
    let mut app = App::new();
    app.upload_input_mut().push('t');
    app.upload_focus_next();
    app.upload_input_mut().push('a');
    app.upload_focus_next();
    app.upload_input_mut().push('p');
    app.upload_focus_next();

    assert_eq!(app.upload.title, "t");
    assert_eq!(app.upload.artist, "a");
    assert_eq!(app.upload.path, "p");
    assert_eq!(app.upload.focus, UploadField::Title);
}

#[test]
fn upload_selection_is_clamped_after_refresh() {
    let mut app = App::new();
    app.upload_selected = 5;
    app.set_uploads(Vec::new());
    assert_eq!(app.upload_selected, 0);
    assert!(app.selected_upload().is_none());
}
