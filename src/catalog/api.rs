use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::config::ApiSettings;

use super::fallback;
use super::model::{SearchResult, Track};

#[derive(Deserialize)]
struct ApiResponse {
    data: ApiData,
}

#[derive(Deserialize)]
struct ApiData {
    results: Vec<ApiSong>,
    #[serde(default)]
    total: Option<usize>,
}

#[derive(Deserialize)]
struct ApiSong {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "primaryArtists")]
    primary_artists: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    image: Vec<ApiLink>,
    #[serde(default, rename = "downloadUrl")]
    download_url: Vec<ApiLink>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    album: Option<ApiAlbum>,
}

#[derive(Deserialize)]
struct ApiLink {
    link: String,
}

#[derive(Deserialize)]
struct ApiAlbum {
    name: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl ApiSong {
    /// Map one provider record into a `Track`.
    ///
    /// The provider ships several image and download-URL variants; the
    /// third image (300x300) and the fifth download URL (highest quality)
    /// are the usable ones. Records without a download URL get a sample
    /// audio URL, rotated deterministically by result index.
    fn into_track(self, index: usize) -> Track {
        let artist = non_empty(self.primary_artists).or(non_empty(self.artist));
        let subtitle = artist
            .clone()
            .or(non_empty(self.subtitle))
            .unwrap_or_default();
        let url = self
            .download_url
            .get(4)
            .map(|l| l.link.clone())
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| fallback::sample_audio_url(index).to_string());

        Track {
            id: self.id,
            title: non_empty(self.name).or(non_empty(self.title)).unwrap_or_default(),
            subtitle,
            image: self.image.get(2).map(|l| l.link.clone()).unwrap_or_default(),
            url,
            duration: non_empty(self.duration),
            artist,
            album: self.album.map(|a| a.name).filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Blocking client for the song search API.
///
/// Every public call succeeds: upstream failures are answered from the
/// built-in sample catalog instead of being propagated.
pub struct CatalogClient {
    http: reqwest::blocking::Client,
    base_url: String,
    page_limit: u32,
    trending_query: String,
    trending_limit: u32,
}

impl CatalogClient {
    pub fn new(api: &ApiSettings) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(api.timeout_ms))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            page_limit: api.page_limit,
            trending_query: api.trending_query.clone(),
            trending_limit: api.trending_limit,
        }
    }

    fn request(&self, query: &str, limit: u32) -> Result<SearchResult, reqwest::Error> {
        let response: ApiResponse = self
            .http
            .get(format!("{}/search/songs", self.base_url))
            .query(&[
                ("query", query),
                ("page", "1"),
                ("limit", &limit.to_string()),
            ])
            .send()?
            .error_for_status()?
            .json()?;

        let tracks: Vec<Track> = response
            .data
            .results
            .into_iter()
            .enumerate()
            .map(|(i, song)| song.into_track(i))
            .collect();
        let total = response.data.total.unwrap_or(tracks.len()).max(tracks.len());

        Ok(SearchResult { tracks, total })
    }

    /// The raw fetch, for callers that want to know whether the provider
    /// answered (the worker uses this to drive the offline indicator).
    pub(crate) fn try_search(&self, query: &str) -> Result<SearchResult, reqwest::Error> {
        let query = query.trim();
        if query.is_empty() {
            // Empty query means "no filter": serve the trending list.
            self.request(&self.trending_query, self.trending_limit)
        } else {
            self.request(query, self.page_limit)
        }
    }

    /// Search the catalog. Falls back to the sample list on any failure.
    pub fn search(&self, query: &str) -> SearchResult {
        self.try_search(query).unwrap_or_else(|e| {
            debug!(error = %e, query, "catalog fetch failed, serving fallback");
            fallback::search(query)
        })
    }

    /// The trending list; identical to `search("")`.
    pub fn trending(&self) -> Vec<Track> {
        self.search("").tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // A trimmed provider payload: one fully populated record, one with
    // most fields missing.
    const PAYLOAD: &str = r#"{
        "data": {
            "results": [
                {
                    "id": "abc123",
                    "name": "Achyutam Keshavam",
                    "primaryArtists": "Vikram Hazra",
                    "subtitle": "ignored when artists present",
                    "image": [
                        {"link": "s.jpg"},
                        {"link": "m.jpg"},
                        {"link": "l.jpg"}
                    ],
                    "downloadUrl": [
                        {"link": "q12.mp4"},
                        {"link": "q48.mp4"},
                        {"link": "q96.mp4"},
                        {"link": "q160.mp4"},
                        {"link": "q320.mp4"}
                    ],
                    "duration": "312",
                    "album": {"name": "Bhajan Sandhya"}
                },
                {
                    "id": "def456",
                    "title": "Untitled Aarti"
                }
            ],
            "total": 240
        }
    }"#;

    #[test]
    fn maps_provider_records_into_tracks() {
        let response: ApiResponse = serde_json::from_str(PAYLOAD).unwrap();
        let tracks: Vec<Track> = response
            .data
            .results
            .into_iter()
            .enumerate()
            .map(|(i, song)| song.into_track(i))
            .collect();

        let full = &tracks[0];
        assert_eq!(full.id, "abc123");
        assert_eq!(full.title, "Achyutam Keshavam");
        assert_eq!(full.subtitle, "Vikram Hazra");
        assert_eq!(full.artist.as_deref(), Some("Vikram Hazra"));
        assert_eq!(full.image, "l.jpg");
        assert_eq!(full.url, "q320.mp4");
        assert_eq!(full.duration.as_deref(), Some("312"));
        assert_eq!(full.album.as_deref(), Some("Bhajan Sandhya"));

        // Sparse record: title from `title`, sample URL substituted for
        // the missing download link (index 1 of the rotation).
        let sparse = &tracks[1];
        assert_eq!(sparse.title, "Untitled Aarti");
        assert!(sparse.subtitle.is_empty());
        assert!(sparse.image.is_empty());
        assert_eq!(sparse.url, fallback::sample_audio_url(1));
        assert_eq!(sparse.duration, None);
        assert_eq!(sparse.album, None);
    }

    #[test]
    fn reported_total_never_undercounts_the_page() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"data": {"results": [{"id": "x"}, {"id": "y"}], "total": 1}}"#,
        )
        .unwrap();
        let tracks = response.data.results.len();
        let total = response.data.total.unwrap_or(tracks).max(tracks);
        assert_eq!(total, 2);
    }
}
