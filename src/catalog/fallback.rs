//! Built-in sample catalog served when the provider is unreachable.
//!
//! The list is fixed and non-empty so the app keeps working offline; the
//! same audio URLs also substitute for catalog entries that come back
//! without a playable download link.

use super::model::{SearchResult, Track};

const SAMPLE_AUDIO_URLS: [&str; 5] = [
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3",
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3",
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-3.mp3",
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-4.mp3",
    "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-5.mp3",
];

/// Deterministic rotation over the sample audio URLs.
pub fn sample_audio_url(index: usize) -> &'static str {
    SAMPLE_AUDIO_URLS[index % SAMPLE_AUDIO_URLS.len()]
}

fn track(
    id: &str,
    title: &str,
    artist: &str,
    image: &str,
    url_index: usize,
    duration: &str,
    album: &str,
) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: artist.to_string(),
        image: image.to_string(),
        url: sample_audio_url(url_index).to_string(),
        duration: Some(duration.to_string()),
        artist: Some(artist.to_string()),
        album: Some(album.to_string()),
    }
}

/// The full sample catalog, in a fixed order.
pub fn sample_catalog() -> Vec<Track> {
    vec![
        track(
            "1",
            "Hanuman Chalisa",
            "Hariharan",
            "https://images.unsplash.com/photo-1583623025817-d180a2221d0a?w=300&h=300&fit=crop",
            0,
            "8:30",
            "Devotional Classics",
        ),
        track(
            "2",
            "Shiv Tandav Stotram",
            "Shankar Mahadevan",
            "https://images.unsplash.com/photo-1604608672516-f1b9b1a65b57?w=300&h=300&fit=crop",
            1,
            "7:45",
            "Shiva Bhajans",
        ),
        track(
            "3",
            "Om Jai Jagdish Hare",
            "Anuradha Paudwal",
            "https://images.unsplash.com/photo-1579783902614-a3fb3927b6a5?w=300&h=300&fit=crop",
            2,
            "5:20",
            "Aarti Collection",
        ),
        track(
            "4",
            "Gayatri Mantra",
            "Suresh Wadkar",
            "https://images.unsplash.com/photo-1545486332-9e0999c535b2?w=300&h=300&fit=crop",
            3,
            "4:15",
            "Vedic Mantras",
        ),
        track(
            "5",
            "Krishna Bhajan",
            "Jagjit Singh",
            "https://images.unsplash.com/photo-1548094990-c16ca90f1f0d?w=300&h=300&fit=crop",
            4,
            "6:30",
            "Krishna Leela",
        ),
        track(
            "6",
            "Ram Dhun",
            "Lata Mangeshkar",
            "https://images.unsplash.com/photo-1614853316476-de00d14cb1fc?w=300&h=300&fit=crop",
            0,
            "5:45",
            "Ram Bhajans",
        ),
        track(
            "7",
            "Durga Chalisa",
            "Kavita Krishnamurthy",
            "https://images.unsplash.com/photo-1582726411144-deaeb0b4e6ed?w=300&h=300&fit=crop",
            1,
            "9:00",
            "Devi Bhajans",
        ),
        track(
            "8",
            "Sai Baba Aarti",
            "S.P. Balasubrahmanyam",
            "https://images.unsplash.com/photo-1590736969955-71cc94901144?w=300&h=300&fit=crop",
            2,
            "7:15",
            "Sai Darshan",
        ),
        track(
            "9",
            "Mahamrityunjaya Mantra",
            "Ravindra Jain",
            "https://images.unsplash.com/photo-1599507593499-a3f7d7d97667?w=300&h=300&fit=crop",
            3,
            "11:20",
            "Shiva Mantras",
        ),
        track(
            "10",
            "Ganesh Aarti",
            "Shankar Mahadevan",
            "https://images.unsplash.com/photo-1533387520709-752d83de3630?w=300&h=300&fit=crop",
            4,
            "4:50",
            "Ganesh Vandana",
        ),
        track(
            "11",
            "Lakshmi Aarti",
            "Anuradha Paudwal",
            "https://images.unsplash.com/photo-1583623025817-d180a2221d0a?w=300&h=300&fit=crop",
            0,
            "5:10",
            "Diwali Special",
        ),
        track(
            "12",
            "Vishnu Sahasranama",
            "M.S. Subbulakshmi",
            "https://images.unsplash.com/photo-1604608672516-f1b9b1a65b57?w=300&h=300&fit=crop",
            1,
            "15:30",
            "Vishnu Stotras",
        ),
    ]
}

/// Filter the sample catalog by a query (case-insensitive match on title
/// or artist). An empty query returns the whole list.
pub fn search(query: &str) -> SearchResult {
    let query = query.trim().to_lowercase();
    let tracks: Vec<Track> = if query.is_empty() {
        sample_catalog()
    } else {
        sample_catalog()
            .into_iter()
            .filter(|t| {
                t.title.to_lowercase().contains(&query)
                    || t.artist
                        .as_deref()
                        .map(|a| a.to_lowercase().contains(&query))
                        .unwrap_or(false)
            })
            .collect()
    };

    let total = tracks.len();
    SearchResult { tracks, total }
}
