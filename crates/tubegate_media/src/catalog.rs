//! Download options for one media item, each carrying its own token.

use crate::{
    MediaConfig, MediaSource, RawFormat, RawInfo, estimate_filesize, format_duration,
    format_filesize, watch_url,
};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};
use tubegate_core::{
    AudioFormat, AudioQuality, AudioQualityLabel, MediaInfo, MediaKind, ResourceDescriptor,
    VideoFormat, VideoQuality,
};
use tubegate_error::{MediaError, MediaErrorKind, TubegateResult};
use tubegate_token::TokenIssuer;

/// How many audio options the catalog offers after deduplication.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AudioSelection {
    /// Only the largest option
    #[default]
    BestOnly,
    /// One option per bitrate bucket
    All,
}

/// Turns extractor metadata into tokenized download options.
#[derive(Debug, Clone)]
pub struct Catalog {
    source: Arc<dyn MediaSource>,
    issuer: TokenIssuer,
    audio_selection: AudioSelection,
    min_video_height: u32,
}

impl Catalog {
    /// Create a catalog issuing tokens through `issuer`.
    pub fn new(source: Arc<dyn MediaSource>, issuer: TokenIssuer, config: &MediaConfig) -> Self {
        Self {
            source,
            issuer,
            audio_selection: config.audio_selection,
            min_video_height: config.min_video_height,
        }
    }

    /// Fetch metadata for `id` and list the `kind` options for `client_addr`.
    ///
    /// # Errors
    ///
    /// Invalid ids and playlists are refused before or after extraction
    /// respectively; extractor failures propagate as media errors.
    #[instrument(skip(self))]
    pub async fn describe(
        &self,
        id: &str,
        kind: MediaKind,
        client_addr: &str,
    ) -> TubegateResult<MediaInfo> {
        let url = watch_url(id)?;
        let info = self.source.fetch_info(&url).await?;
        self.list_formats(id, kind, &info, client_addr)
    }

    /// List options from already-fetched metadata.
    pub fn list_formats(
        &self,
        id: &str,
        kind: MediaKind,
        info: &RawInfo,
        client_addr: &str,
    ) -> TubegateResult<MediaInfo> {
        if info.is_playlist() {
            return Err(MediaError::new(MediaErrorKind::PlaylistUnsupported).into());
        }

        let title = non_empty(&info.title).unwrap_or("Unknown").to_string();
        let duration = info.duration_secs();

        let (video_formats, audio_formats) = match kind {
            MediaKind::Video => (self.video_formats(id, &title, info, client_addr)?, Vec::new()),
            MediaKind::Audio => (Vec::new(), self.audio_formats(id, &title, info, client_addr)?),
        };
        debug!(
            video = video_formats.len(),
            audio = audio_formats.len(),
            raw = info.formats.len(),
            "Listed formats"
        );

        Ok(MediaInfo {
            duration,
            duration_human: format_duration(duration),
            thumbnail: info.thumbnail.clone().unwrap_or_default(),
            uploader: non_empty(&info.uploader).unwrap_or("Unknown").to_string(),
            video_formats,
            audio_formats,
            raw_formats_count: info.formats.len(),
            title,
        })
    }

    fn video_formats(
        &self,
        id: &str,
        title: &str,
        info: &RawInfo,
        client_addr: &str,
    ) -> TubegateResult<Vec<VideoFormat>> {
        // One candidate per resolution label, highest first.
        let mut best: BTreeMap<Reverse<VideoQuality>, &RawFormat> = BTreeMap::new();
        for format in info.formats.iter().filter(|f| f.has_video()) {
            let Some(height) = format.height.filter(|h| *h >= self.min_video_height) else {
                continue;
            };
            let Some(quality) = VideoQuality::from_height(height) else {
                continue;
            };
            best.entry(Reverse(quality))
                .and_modify(|current| {
                    if preferred(format, *current) {
                        *current = format;
                    }
                })
                .or_insert(format);
        }

        best.into_iter()
            .map(|(Reverse(quality), format)| -> TubegateResult<VideoFormat> {
                let filesize = estimate_filesize(format, info.duration_secs());
                let descriptor = ResourceDescriptor::new(id, title, quality);
                Ok(VideoFormat {
                    quality,
                    quality_human: quality.human_label().to_string(),
                    resolution: format.resolution_label(),
                    filesize,
                    filesize_human: format_filesize(filesize),
                    fps: format.fps,
                    has_audio: format.has_audio(),
                    token: self.issuer.issue(&descriptor, client_addr)?,
                })
            })
            .collect()
    }

    fn audio_formats(
        &self,
        id: &str,
        title: &str,
        info: &RawInfo,
        client_addr: &str,
    ) -> TubegateResult<Vec<AudioFormat>> {
        let mut seen = Vec::new();
        let mut candidates = Vec::new();
        for format in info.formats.iter().filter(|f| f.is_audio_only()) {
            let label = AudioQualityLabel::from_bitrate(format.abr.unwrap_or(0.0));
            if seen.contains(&label) {
                continue;
            }
            seen.push(label);
            candidates.push((label, format, estimate_filesize(format, info.duration_secs())));
        }

        candidates.sort_by(|a, b| b.2.cmp(&a.2));
        if self.audio_selection == AudioSelection::BestOnly {
            candidates.truncate(1);
        }

        candidates
            .into_iter()
            .map(|(label, format, filesize)| -> TubegateResult<AudioFormat> {
                let quality = AudioQuality::saturating(format.quality.unwrap_or(0.0));
                let descriptor = ResourceDescriptor::new(id, title, quality);
                Ok(AudioFormat {
                    quality,
                    quality_human: label,
                    filesize,
                    filesize_human: format_filesize(filesize),
                    token: self.issuer.issue(&descriptor, client_addr)?,
                })
            })
            .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Whether `candidate` beats `current` for the same resolution label:
/// carrying audio first, then the larger reported size.
fn preferred(candidate: &RawFormat, current: &RawFormat) -> bool {
    match (candidate.has_audio(), current.has_audio()) {
        (true, false) => true,
        (false, true) => false,
        _ => candidate.reported_filesize() > current.reported_filesize(),
    }
}
