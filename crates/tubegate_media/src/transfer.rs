//! Turning a redeemed descriptor into a download.

use crate::{MediaSource, MediaStream, watch_url};
use futures::StreamExt;
use std::sync::Arc;
use tracing::{info, instrument};
use tubegate_core::{MediaVariant, ResourceDescriptor};
use tubegate_error::{MediaError, MediaErrorKind, MediaResult};

const MAX_FILENAME_LEN: usize = 200;

/// Replace characters that are unsafe in a `Content-Disposition` filename.
///
/// Non-ASCII and control characters are dropped and path or shell
/// metacharacters become `_`. The result is trimmed and capped at 200
/// characters; an empty result becomes `download`.
///
/// # Examples
///
/// ```
/// use tubegate_media::sanitize_filename;
///
/// assert_eq!(sanitize_filename("a/b: c?"), "a_b_ c_");
/// assert_eq!(sanitize_filename("  Café 日本  "), "Caf");
/// assert_eq!(sanitize_filename("日本"), "download");
/// ```
pub fn sanitize_filename(title: &str) -> String {
    let replaced: String = title
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c => c,
        })
        .collect();
    let trimmed: String = replaced.trim().chars().take(MAX_FILENAME_LEN).collect();
    if trimmed.is_empty() {
        "download".to_string()
    } else {
        trimmed
    }
}

/// Extractor arguments and response headers for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct TransferPlan {
    args: Vec<String>,
    filename: String,
    #[getter(skip)]
    content_type: &'static str,
}

impl TransferPlan {
    /// Plan the transfer of `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`MediaErrorKind::InvalidId`] when the id is not a bare video id.
    pub fn for_descriptor(descriptor: &ResourceDescriptor) -> MediaResult<Self> {
        let url = watch_url(descriptor.id())?;
        let title = sanitize_filename(descriptor.title());

        let plan = match descriptor.variant() {
            MediaVariant::Video(quality) => {
                let height = quality.height();
                Self {
                    args: vec![
                        "-f".into(),
                        format!("best[height<={height}][ext=mp4]/best[height<={height}]"),
                        "-o".into(),
                        "-".into(),
                        url,
                    ],
                    filename: format!("{}_video({}).mp4", title, quality),
                    content_type: "video/mp4",
                }
            }
            MediaVariant::Audio(quality) => Self {
                args: vec![
                    "-f".into(),
                    "bestaudio".into(),
                    "-x".into(),
                    "--audio-format".into(),
                    "mp3".into(),
                    "--audio-quality".into(),
                    quality.level().to_string(),
                    "-o".into(),
                    "-".into(),
                    url,
                ],
                filename: format!("{}_audio.mp3", title),
                content_type: "audio/mpeg",
            },
        };
        Ok(plan)
    }

    /// `Content-Type` header value.
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// `Content-Disposition` header value.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// A started transfer: headers plus the bytes.
pub struct Download {
    /// How the download is named and typed
    pub plan: TransferPlan,
    /// Media bytes, starting with the first chunk the extractor produced
    pub stream: MediaStream,
}

impl std::fmt::Debug for Download {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Download").field("plan", &self.plan).finish_non_exhaustive()
    }
}

/// Starts downloads for redeemed descriptors.
#[derive(Debug, Clone)]
pub struct Transfer {
    source: Arc<dyn MediaSource>,
}

impl Transfer {
    /// Create a transfer over `source`.
    pub fn new(source: Arc<dyn MediaSource>) -> Self {
        Self { source }
    }

    /// Start the download and wait for its first chunk.
    ///
    /// Waiting for the first chunk lets an extractor that fails up front be
    /// reported as an error instead of an empty successful response.
    #[instrument(skip(self, descriptor), fields(id = %descriptor.id(), variant = %descriptor.variant()))]
    pub async fn start(&self, descriptor: &ResourceDescriptor) -> MediaResult<Download> {
        let plan = TransferPlan::for_descriptor(descriptor)?;
        let mut stream = self.source.open_stream(plan.args()).await?;

        let first = match stream.next().await {
            Some(Ok(chunk)) => chunk,
            Some(Err(e)) => return Err(e),
            None => {
                return Err(MediaError::new(MediaErrorKind::ToolFailed(
                    "extractor produced no output".to_string(),
                )));
            }
        };

        info!(filename = %plan.filename(), "Transfer started");
        let stream = futures::stream::once(async move { Ok(first) })
            .chain(stream)
            .boxed();
        Ok(Download { plan, stream })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubegate_core::{AudioQuality, VideoQuality};

    #[test]
    fn video_plan() {
        let d = ResourceDescriptor::new("dQw4w9WgXcQ", "My: Video", VideoQuality::P720);
        let plan = TransferPlan::for_descriptor(&d).unwrap();
        assert_eq!(plan.content_type(), "video/mp4");
        assert_eq!(plan.filename(), "My_ Video_video(720p).mp4");
        assert_eq!(plan.args()[1], "best[height<=720][ext=mp4]/best[height<=720]");
        assert_eq!(
            plan.args().last().map(String::as_str),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        );
    }

    #[test]
    fn audio_plan_carries_level() {
        let d = ResourceDescriptor::new("dQw4w9WgXcQ", "Song", AudioQuality::new(3).unwrap());
        let plan = TransferPlan::for_descriptor(&d).unwrap();
        assert_eq!(plan.content_type(), "audio/mpeg");
        assert_eq!(plan.filename(), "Song_audio.mp3");
        let pos = plan.args().iter().position(|a| a == "--audio-quality").unwrap();
        assert_eq!(plan.args()[pos + 1], "3");
        assert_eq!(plan.content_disposition(), "attachment; filename=\"Song_audio.mp3\"");
    }

    #[test]
    fn invalid_id_is_refused() {
        let d = ResourceDescriptor::new("abc123", "T", VideoQuality::P720);
        let err = TransferPlan::for_descriptor(&d).unwrap_err();
        assert!(matches!(err.kind(), MediaErrorKind::InvalidId(_)));
    }

    #[test]
    fn control_characters_cannot_split_headers() {
        assert_eq!(sanitize_filename("a\r\nSet-Cookie: x"), "aSet-Cookie_ x");
    }

    #[test]
    fn filename_is_capped() {
        let long = "x".repeat(500);
        assert_eq!(sanitize_filename(&long).len(), 200);
    }
}
