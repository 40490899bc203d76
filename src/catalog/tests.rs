use std::thread;
use std::time::Duration;

use super::fallback;
use super::*;
use crate::config::ApiSettings;

fn unreachable_client() -> CatalogClient {
    // Port 9 (discard) is refused immediately on loopback; the short
    // timeout covers environments where it is silently dropped instead.
    CatalogClient::new(&ApiSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_ms: 250,
        ..ApiSettings::default()
    })
}

#[test]
fn sample_catalog_is_deterministic_and_nonempty() {
    let a = sample_catalog();
    let b = sample_catalog();
    assert!(!a.is_empty());
    assert_eq!(a, b);

    let mut ids: Vec<&str> = a.iter().map(|t| t.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), a.len(), "sample ids must be unique");

    for t in &a {
        assert!(!t.url.is_empty(), "sample tracks must be playable");
    }
}

#[test]
fn sample_audio_url_rotates() {
    assert_eq!(sample_audio_url(0), sample_audio_url(5));
    assert_ne!(sample_audio_url(0), sample_audio_url(1));
}

#[test]
fn fallback_search_filters_by_title_or_artist() {
    let result = fallback::search("hanuman");
    assert_eq!(result.total, 1);
    assert_eq!(result.tracks[0].title, "Hanuman Chalisa");

    let by_artist = fallback::search("shankar mahadevan");
    assert_eq!(by_artist.total, 2);
}

#[test]
fn fallback_search_empty_query_returns_everything() {
    let result = fallback::search("");
    assert_eq!(result.tracks, sample_catalog());
    assert_eq!(result.total, result.tracks.len());
}

#[test]
fn unreachable_provider_serves_nonempty_fallback() {
    let client = unreachable_client();
    let result = client.search("");
    assert!(!result.tracks.is_empty());
    assert_eq!(result.tracks, sample_catalog());
}

#[test]
fn search_empty_query_matches_trending() {
    let client = unreachable_client();
    assert_eq!(client.search("").tracks, client.trending());
    assert_eq!(client.search("   ").tracks, client.trending());
}

#[test]
fn unreachable_provider_search_still_filters() {
    let client = unreachable_client();
    let result = client.search("gayatri");
    assert_eq!(result.total, 1);
    assert_eq!(result.tracks[0].title, "Gayatri Mantra");
}

#[test]
fn worker_reports_offline_fallback() {
    let worker = CatalogWorker::spawn(unreachable_client());
    worker.request("");

    let mut update = None;
    for _ in 0..200 {
        if let Some(u) = worker.try_update() {
            update = Some(u);
            break;
        }
        thread::sleep(Duration::from_millis(25));
    }

    let update = update.expect("worker never answered");
    assert!(update.offline);
    assert!(!update.tracks.is_empty());
}

#[test]
fn display_name_prefers_artist_over_subtitle() {
    let mut t = sample_catalog().remove(0);
    assert_eq!(t.display_name(), "Hariharan");

    t.artist = None;
    t.subtitle = "From the subtitle".to_string();
    assert_eq!(t.display_name(), "From the subtitle");

    t.artist = Some("   ".to_string());
    assert_eq!(t.display_name(), "From the subtitle");
}

#[test]
fn display_joins_artist_and_title() {
    let t = sample_catalog().remove(0);
    assert_eq!(t.display(), "Hariharan - Hanuman Chalisa");
}

#[test]
fn image_falls_back_to_placeholder() {
    let mut t = sample_catalog().remove(0);
    t.image = String::new();
    assert_eq!(t.image_or_placeholder(), PLACEHOLDER_IMAGE);
}
