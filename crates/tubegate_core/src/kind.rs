//! Media kind selector.

use serde::{Deserialize, Serialize};

/// Whether a download is the audio track or the video.
///
/// # Examples
///
/// ```
/// use tubegate_core::MediaKind;
/// use std::str::FromStr;
///
/// assert_eq!(MediaKind::from_str("audio").unwrap(), MediaKind::Audio);
/// assert_eq!(MediaKind::Video.to_string(), "video");
/// assert!(MediaKind::from_str("podcast").is_err());
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    /// Audio-only extraction
    Audio,
    /// Video with its audio track
    Video,
}
