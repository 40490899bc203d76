//! Shell model types: `App`, screens and admin form state.

use crate::admin::UploadRecord;
use crate::catalog::{CatalogUpdate, Track};

/// Which screen the shell is showing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    Browse,
    AdminLogin,
    Admin,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UploadField {
    Title,
    Artist,
    Path,
}

/// Feedback line shown under the admin forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormMessage {
    pub text: String,
    pub error: bool,
}

impl FormMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: true,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: false,
        }
    }
}

impl Default for LoginField {
    fn default() -> Self {
        Self::Username
    }
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct UploadForm {
    pub title: String,
    pub artist: String,
    pub path: String,
    pub focus: UploadField,
    pub message: Option<FormMessage>,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            path: String::new(),
            focus: UploadField::Title,
            message: None,
        }
    }
}

/// The main shell model.
pub struct App {
    pub songs: Vec<Track>,
    pub selected: usize,
    /// Provider-reported total for the current result page.
    pub total: usize,

    pub query: String,
    pub search_mode: bool,
    pub loading: bool,
    /// False when the last catalog answer came from the offline fallback.
    pub online: bool,

    /// Mirror of the session's current track, for list markers and the
    /// status line.
    pub now_playing: Option<Track>,

    pub screen: Screen,
    pub login: LoginForm,
    pub upload: UploadForm,
    pub uploads: Vec<UploadRecord>,
    pub upload_selected: usize,

    pub detail_open: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            songs: Vec::new(),
            selected: 0,
            total: 0,
            query: String::new(),
            search_mode: false,
            loading: true,
            online: true,
            now_playing: None,
            screen: Screen::Browse,
            login: LoginForm::default(),
            upload: UploadForm::default(),
            uploads: Vec::new(),
            upload_selected: 0,
            detail_open: false,
        }
    }

    /// Apply a finished catalog lookup.
    pub fn apply_catalog_update(&mut self, update: CatalogUpdate) {
        self.songs = update.tracks;
        self.total = update.total;
        self.online = !update.offline;
        self.loading = false;
        self.selected = 0;
        self.detail_open = false;
    }

    pub fn has_songs(&self) -> bool {
        !self.songs.is_empty()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.songs.get(self.selected)
    }

    /// Move selection to the next song, wrapping around.
    pub fn next(&mut self) {
        if !self.songs.is_empty() {
            self.selected = (self.selected + 1) % self.songs.len();
        }
    }

    /// Move selection to the previous song, wrapping around.
    pub fn prev(&mut self) {
        if !self.songs.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.songs.len() - 1);
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.songs.len().saturating_sub(1);
    }

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
        self.detail_open = false;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
    }

    pub fn toggle_detail(&mut self) {
        self.detail_open = !self.detail_open;
    }

    /// Switch to the login screen with a fresh form.
    pub fn open_admin_login(&mut self) {
        self.login = LoginForm::default();
        self.screen = Screen::AdminLogin;
        self.search_mode = false;
        self.detail_open = false;
    }

    /// Successful login: move to the dashboard with a fresh upload form.
    pub fn enter_admin(&mut self, uploads: Vec<UploadRecord>) {
        self.upload = UploadForm::default();
        self.set_uploads(uploads);
        self.screen = Screen::Admin;
    }

    /// Leave the admin screens and drop any typed credentials.
    pub fn leave_admin(&mut self) {
        self.login = LoginForm::default();
        self.screen = Screen::Browse;
    }

    pub fn set_uploads(&mut self, uploads: Vec<UploadRecord>) {
        self.uploads = uploads;
        if self.upload_selected >= self.uploads.len() {
            self.upload_selected = self.uploads.len().saturating_sub(1);
        }
    }

    pub fn selected_upload(&self) -> Option<&UploadRecord> {
        self.uploads.get(self.upload_selected)
    }

    pub fn upload_next(&mut self) {
        if !self.uploads.is_empty() {
            self.upload_selected = (self.upload_selected + 1) % self.uploads.len();
        }
    }

    pub fn upload_prev(&mut self) {
        if !self.uploads.is_empty() {
            self.upload_selected = self
                .upload_selected
                .checked_sub(1)
                .unwrap_or(self.uploads.len() - 1);
        }
    }

    /// Cycle login focus Username -> Password -> Username.
    pub fn login_focus_next(&mut self) {
        self.login.focus = match self.login.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    /// Cycle upload focus Title -> Artist -> Path -> Title.
    pub fn upload_focus_next(&mut self) {
        self.upload.focus = match self.upload.focus {
            UploadField::Title => UploadField::Artist,
            UploadField::Artist => UploadField::Path,
            UploadField::Path => UploadField::Title,
        };
    }

    /// The login field currently receiving keystrokes.
    pub fn login_input_mut(&mut self) -> &mut String {
        match self.login.focus {
            LoginField::Username => &mut self.login.username,
            LoginField::Password => &mut self.login.password,
        }
    }

    /// The upload field currently receiving keystrokes.
    pub fn upload_input_mut(&mut self) -> &mut String {
        match self.upload.focus {
            UploadField::Title => &mut self.upload.title,
            UploadField::Artist => &mut self.upload.artist,
            UploadField::Path => &mut self.upload.path,
        }
    }
}
