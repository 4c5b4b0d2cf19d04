//! Media id validation.

use std::sync::LazyLock;
use regex::Regex;
use tubegate_error::{MediaError, MediaErrorKind, MediaResult};

static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Valid video id regex"));

/// Watch URL for a video id.
///
/// Only bare 11-character ids are accepted, so a client cannot smuggle an
/// arbitrary URL or extractor option through the id.
///
/// # Examples
///
/// ```
/// use tubegate_media::watch_url;
///
/// assert_eq!(
///     watch_url("dQw4w9WgXcQ").unwrap(),
///     "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
/// );
/// assert!(watch_url("--exec=rm").is_err());
/// ```
pub fn watch_url(id: &str) -> MediaResult<String> {
    if !VIDEO_ID.is_match(id) {
        return Err(MediaError::new(MediaErrorKind::InvalidId(id.to_string())));
    }
    Ok(format!("https://www.youtube.com/watch?v={}", id))
}
