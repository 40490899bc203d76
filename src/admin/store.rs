use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use lofty::file::AudioFile;
use lofty::probe::Probe;
use serde::{Deserialize, Serialize};

use crate::catalog::Track;
use crate::error::StoreError;

const UPLOADS_FILE: &str = "uploads.json";
const CUSTOM_TRACKS_FILE: &str = "custom_tracks.json";

const UPLOAD_IMAGE: &str =
    "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=300&h=300&fit=crop";
const UPLOAD_ALBUM: &str = "Uploaded Audio";

/// One uploaded audio file, stored inline as a base64 data URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// `data:<mime>;base64,...` payload.
    pub file: String,
    /// Display duration, `M:SS`.
    pub duration: String,
    pub uploaded_at: DateTime<Utc>,
}

impl UploadRecord {
    /// The track mirrored into the browse list.
    pub fn to_track(&self) -> Track {
        Track {
            id: self.id.clone(),
            title: self.title.clone(),
            subtitle: self.artist.clone(),
            image: UPLOAD_IMAGE.to_string(),
            url: self.file.clone(),
            duration: Some(self.duration.clone()),
            artist: Some(self.artist.clone()),
            album: Some(UPLOAD_ALBUM.to_string()),
        }
    }
}

/// JSON-file store for admin uploads.
///
/// Two fixed keys, mirrored on every write: `uploads.json` holds the
/// upload records, `custom_tracks.json` the track list merged into the
/// browse screen (newest first). Writes are whole-file, last-writer-wins;
/// loads tolerate missing or unreadable files.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn uploads_path(&self) -> PathBuf {
        self.dir.join(UPLOADS_FILE)
    }

    fn custom_tracks_path(&self) -> PathBuf {
        self.dir.join(CUSTOM_TRACKS_FILE)
    }

    pub fn uploads(&self) -> Vec<UploadRecord> {
        load_list(&self.uploads_path())
    }

    pub fn custom_tracks(&self) -> Vec<Track> {
        load_list(&self.custom_tracks_path())
    }

    /// Store a local audio file as an upload and mirror it into the
    /// custom-tracks list.
    pub fn add(&self, title: &str, artist: &str, audio_path: &Path) -> Result<UploadRecord, StoreError> {
        if !is_audio_file(audio_path) {
            return Err(StoreError::NotAudio(audio_path.to_path_buf()));
        }

        let bytes = fs::read(audio_path)?;
        let file = format!("data:{};base64,{}", mime_for(audio_path), STANDARD.encode(&bytes));
        let duration = probe_duration(audio_path)
            .map(format_duration)
            .unwrap_or_else(|| "0:00".to_string());

        let uploads = self.uploads();
        let uploaded_at = Utc::now();
        // Timestamp-derived ids can collide within a millisecond; bump
        // until free.
        let mut millis = uploaded_at.timestamp_millis();
        while uploads.iter().any(|u| u.id == millis.to_string()) {
            millis += 1;
        }

        let record = UploadRecord {
            id: millis.to_string(),
            title: title.trim().to_string(),
            artist: artist.trim().to_string(),
            file,
            duration,
            uploaded_at,
        };

        let mut uploads = uploads;
        uploads.push(record.clone());
        save_list(&self.uploads_path(), &uploads)?;

        let mut tracks = self.custom_tracks();
        tracks.insert(0, record.to_track());
        save_list(&self.custom_tracks_path(), &tracks)?;

        Ok(record)
    }

    /// Remove an upload from both lists. Unknown ids are a no-op.
    pub fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut uploads = self.uploads();
        uploads.retain(|u| u.id != id);
        save_list(&self.uploads_path(), &uploads)?;

        let mut tracks = self.custom_tracks();
        tracks.retain(|t| t.id != id);
        save_list(&self.custom_tracks_path(), &tracks)?;

        Ok(())
    }
}

fn load_list<T: serde::de::DeserializeOwned>(path: &Path) -> Vec<T> {
    fs::read_to_string(path)
        .ok()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

fn save_list<T: Serialize>(path: &Path, value: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Data directory: `$XDG_DATA_HOME/kirtan` or `~/.local/share/kirtan`.
pub fn default_data_dir() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("share"))
    } else {
        None
    };

    data_home.map(|d| d.join("kirtan"))
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "mp3" | "flac" | "wav" | "ogg" | "m4a" | "aac"
            )
        })
        .unwrap_or(false)
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .as_deref()
    {
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        Some("flac") => "audio/flac",
        Some("m4a") | Some("aac") => "audio/mp4",
        _ => "audio/mpeg",
    }
}

fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = Probe::open(path).ok()?.read().ok()?;
    Some(tagged.properties().duration())
}

/// `M:SS`, the display format the catalog uses for durations.
fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
