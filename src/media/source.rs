//! Resolution of a track's source locator into raw audio bytes.
//!
//! Three locator shapes are supported: `data:` URLs (admin uploads),
//! `http(s)` URLs (catalog results) and plain local paths.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::MediaError;

pub(super) fn resolve(locator: &str) -> Result<Vec<u8>, MediaError> {
    if locator.starts_with("data:") {
        decode_data_url(locator)
    } else if locator.starts_with("http://") || locator.starts_with("https://") {
        fetch_remote(locator)
    } else {
        Ok(std::fs::read(locator)?)
    }
}

/// Decode a `data:<mime>;base64,<payload>` URL.
pub(super) fn decode_data_url(url: &str) -> Result<Vec<u8>, MediaError> {
    let (_, payload) = url
        .split_once(";base64,")
        .ok_or(MediaError::InvalidDataUrl)?;
    STANDARD
        .decode(payload.trim())
        .map_err(|_| MediaError::InvalidDataUrl)
}

/// Fetch a remote source into memory.
///
/// Deliberately without a request timeout: a stalled load keeps the
/// session in Loading until a new bind supersedes it.
fn fetch_remote(url: &str) -> Result<Vec<u8>, MediaError> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}
