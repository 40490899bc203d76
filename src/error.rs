//! Error types shared across subsystems.
//!
//! Catalog fetch failures are deliberately not represented here: the
//! catalog swallows them into its built-in fallback list and never
//! surfaces them to callers.

use std::path::PathBuf;

/// Failure to resolve or decode a media source.
///
/// All variants end up as a `LoadFailed` media event and put the
/// playback session into the Errored state; there is no auto-retry.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to fetch media source: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("malformed data URL")]
    InvalidDataUrl,

    #[error("failed to decode audio: {0}")]
    Decode(String),
}

/// Failure in the admin upload store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not an audio file: {0}")]
    NotAudio(PathBuf),
}
