//! Download options returned by the metadata endpoint.

use crate::{AudioQuality, VideoQuality};
use serde::{Deserialize, Serialize};

/// A downloadable video rendition and the token that redeems it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoFormat {
    /// Resolution label
    pub quality: VideoQuality,
    /// Marketing label ("4K", "FHD", ... or empty)
    pub quality_human: String,
    /// Resolution as reported by the extractor (e.g. "1280x720")
    pub resolution: String,
    /// Size in bytes, 0 when unknown
    pub filesize: u64,
    /// Human-readable size
    pub filesize_human: String,
    /// Frames per second, when known
    pub fps: Option<f64>,
    /// Whether the rendition carries an audio track
    pub has_audio: bool,
    /// Capability token for this rendition
    pub token: String,
}

/// Coarse bitrate bucket used to deduplicate audio renditions.
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
)]
pub enum AudioQualityLabel {
    /// 192 kbps and above
    High,
    /// 128 kbps and above
    Medium,
    /// Below 128 kbps
    Low,
}

impl AudioQualityLabel {
    /// Bucket an average bitrate in kbps.
    ///
    /// # Examples
    ///
    /// ```
    /// use tubegate_core::AudioQualityLabel;
    ///
    /// assert_eq!(AudioQualityLabel::from_bitrate(256.0), AudioQualityLabel::High);
    /// assert_eq!(AudioQualityLabel::from_bitrate(128.0), AudioQualityLabel::Medium);
    /// assert_eq!(AudioQualityLabel::from_bitrate(0.0), AudioQualityLabel::Low);
    /// ```
    pub fn from_bitrate(kbps: f64) -> Self {
        if kbps >= 192.0 {
            Self::High
        } else if kbps >= 128.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A downloadable audio rendition and the token that redeems it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFormat {
    /// Encoder quality level
    pub quality: AudioQuality,
    /// Bitrate bucket
    pub quality_human: AudioQualityLabel,
    /// Size in bytes, 0 when unknown
    pub filesize: u64,
    /// Human-readable size
    pub filesize_human: String,
    /// Capability token for this rendition
    pub token: String,
}

/// Metadata and download options for a single media item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    /// Item title
    pub title: String,
    /// Duration in seconds
    pub duration: u64,
    /// Duration as `m:ss`
    pub duration_human: String,
    /// Thumbnail URL, empty when unknown
    pub thumbnail: String,
    /// Uploader name
    pub uploader: String,
    /// Video options, highest resolution first
    pub video_formats: Vec<VideoFormat>,
    /// Audio options
    pub audio_formats: Vec<AudioFormat>,
    /// Number of formats the extractor reported before filtering
    pub raw_formats_count: usize,
}

/// Body of a successful metadata response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoResponse {
    /// Always `true`
    pub success: bool,
    /// The item
    pub info: MediaInfo,
}

impl From<MediaInfo> for InfoResponse {
    fn from(info: MediaInfo) -> Self {
        Self {
            success: true,
            info,
        }
    }
}
