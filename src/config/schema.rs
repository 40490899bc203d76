use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/kirtan/config.toml` or
/// `~/.config/kirtan/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `KIRTAN__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub storage: StorageSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            playback: PlaybackSettings::default(),
            controls: ControlsSettings::default(),
            ui: UiSettings::default(),
            storage: StorageSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL of the song search API.
    pub base_url: String,
    /// Request timeout for catalog lookups (milliseconds).
    pub timeout_ms: u64,
    /// Result page size for searches.
    pub page_limit: u32,
    /// Query used to populate the trending/home list.
    pub trending_query: String,
    /// Result count for the trending/home list.
    pub trending_limit: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://jiosaavn-api-privatecvc.vercel.app".to_string(),
            timeout_ms: 5000,
            page_limit: 20,
            trending_query: "hindi bhakti songs".to_string(),
            trending_limit: 12,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Initial session volume, `0.0` to `1.0`.
    pub volume: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change when pressing `-` / `+`.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Placeholder shown in an empty search box.
    pub search_placeholder: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Divine melodies, anywhere ~ ".to_string(),
            search_placeholder: "Search for bhakti songs, artists...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where the upload store lives. Defaults to the XDG data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self { data_dir: None }
    }
}
