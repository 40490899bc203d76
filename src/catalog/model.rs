use serde::{Deserialize, Serialize};

/// Thumbnail shown when a track carries no usable image URL.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x300?text=%E2%99%AA";

/// A playable track with display metadata and a media source locator.
///
/// `url` may be a remote `http(s)` URL, a `data:` URL (admin uploads) or a
/// local path; an empty `url` means the track cannot be played. `duration`
/// is a display-only string from the provider; the authoritative duration
/// comes from the media source once it has loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub url: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
}

impl Track {
    /// The name to credit the track to: `artist` when present, otherwise
    /// the provider's `subtitle`.
    pub fn display_name(&self) -> &str {
        match self.artist.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => a,
            _ => self.subtitle.trim(),
        }
    }

    /// One-line list entry, `Artist - Title` when an artist is known.
    pub fn display(&self) -> String {
        let name = self.display_name();
        if name.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", name, self.title)
        }
    }

    pub fn image_or_placeholder(&self) -> &str {
        if self.image.trim().is_empty() {
            PLACEHOLDER_IMAGE
        } else {
            &self.image
        }
    }
}

/// Result of a catalog search: the page of tracks plus the provider's
/// reported total (which may exceed the page length).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub tracks: Vec<Track>,
    pub total: usize,
}
