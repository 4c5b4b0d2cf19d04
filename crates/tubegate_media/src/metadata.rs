//! The subset of `yt-dlp -J` output the catalog reads.

use serde::Deserialize;

/// Top-level extractor output for one URL.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawInfo {
    /// Item title
    #[serde(default)]
    pub title: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    /// Thumbnail URL
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Uploader name
    #[serde(default)]
    pub uploader: Option<String>,
    /// Every rendition the extractor found
    #[serde(default)]
    pub formats: Vec<RawFormat>,
    /// Present when the URL resolved to a playlist
    #[serde(default)]
    pub entries: Option<Vec<serde_json::Value>>,
}

impl RawInfo {
    /// Whether the URL resolved to a playlist rather than a single item.
    pub fn is_playlist(&self) -> bool {
        self.entries.is_some()
    }

    /// Duration in whole seconds, 0 when unknown.
    pub fn duration_secs(&self) -> u64 {
        self.duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .map(|d| d as u64)
            .unwrap_or(0)
    }
}

/// One rendition.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFormat {
    /// Extractor format code
    #[serde(default)]
    pub format_id: Option<String>,
    /// Video codec, `"none"` for audio-only
    #[serde(default)]
    pub vcodec: Option<String>,
    /// Audio codec, `"none"` for video-only
    #[serde(default)]
    pub acodec: Option<String>,
    /// Resolution string such as `"1280x720"` or `"audio only"`
    #[serde(default)]
    pub resolution: Option<String>,
    /// Frame width
    #[serde(default)]
    pub width: Option<u32>,
    /// Frame height
    #[serde(default)]
    pub height: Option<u32>,
    /// Frames per second
    #[serde(default)]
    pub fps: Option<f64>,
    /// Exact size in bytes
    #[serde(default)]
    pub filesize: Option<f64>,
    /// Approximate size in bytes
    #[serde(default)]
    pub filesize_approx: Option<f64>,
    /// Total bitrate, kbps
    #[serde(default)]
    pub tbr: Option<f64>,
    /// Video bitrate, kbps
    #[serde(default)]
    pub vbr: Option<f64>,
    /// Audio bitrate, kbps
    #[serde(default)]
    pub abr: Option<f64>,
    /// Extractor's relative quality score
    #[serde(default)]
    pub quality: Option<f64>,
}

fn is_codec(codec: &Option<String>) -> bool {
    matches!(codec.as_deref(), Some(c) if !c.is_empty() && c != "none")
}

impl RawFormat {
    /// Carries a video stream.
    pub fn has_video(&self) -> bool {
        is_codec(&self.vcodec)
    }

    /// Carries an audio stream.
    pub fn has_audio(&self) -> bool {
        is_codec(&self.acodec)
    }

    /// Audio stream and no video stream.
    pub fn is_audio_only(&self) -> bool {
        self.has_audio() && !self.has_video()
    }

    /// Resolution string, falling back to `{width}x{height}`.
    pub fn resolution_label(&self) -> String {
        match &self.resolution {
            Some(r) if !r.is_empty() => r.clone(),
            _ => format!(
                "{}x{}",
                self.width.map(|w| w.to_string()).unwrap_or_else(|| "?".into()),
                self.height.map(|h| h.to_string()).unwrap_or_else(|| "?".into())
            ),
        }
    }

    /// Exact size reported by the extractor, 0 when absent.
    pub fn reported_filesize(&self) -> u64 {
        self.filesize
            .filter(|s| s.is_finite() && *s > 0.0)
            .map(|s| s as u64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_output() {
        let info: RawInfo = serde_json::from_str(
            r#"{"title":"T","duration":61.5,"formats":[
                {"format_id":"140","vcodec":"none","acodec":"mp4a.40.2","abr":129.5,"filesize":null},
                {"format_id":"22","vcodec":"avc1","acodec":"mp4a","height":720,"width":1280,"fps":30}
            ],"unrelated":{"nested":true}}"#,
        )
        .unwrap();
        assert_eq!(info.formats.len(), 2);
        assert!(!info.is_playlist());
        assert_eq!(info.duration_secs(), 61);
        assert!(info.formats[0].is_audio_only());
        assert!(info.formats[1].has_video() && info.formats[1].has_audio());
        assert_eq!(info.formats[1].resolution_label(), "1280x720");
    }

    #[test]
    fn entries_mark_a_playlist() {
        let info: RawInfo = serde_json::from_str(r#"{"entries":[{"id":"a"}]}"#).unwrap();
        assert!(info.is_playlist());
    }
}
