//! The extractor seam.

use crate::RawInfo;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, instrument, warn};
use tubegate_error::{MediaError, MediaErrorKind, MediaResult};

const CHUNK_SIZE: usize = 64 * 1024;

/// Media bytes as they arrive from the extractor.
pub type MediaStream = BoxStream<'static, MediaResult<Vec<u8>>>;

/// Where metadata and media bytes come from.
#[async_trait]
pub trait MediaSource: Send + Sync + std::fmt::Debug {
    /// Full metadata for `url`.
    async fn fetch_info(&self, url: &str) -> MediaResult<RawInfo>;

    /// Start producing media bytes with the given extractor arguments.
    ///
    /// Dropping the stream stops the transfer.
    async fn open_stream(&self, args: &[String]) -> MediaResult<MediaStream>;
}

/// [`MediaSource`] backed by the `yt-dlp` executable.
#[derive(Debug, Clone)]
pub struct YtDlpSource {
    program: PathBuf,
}

impl YtDlpSource {
    /// Use the executable at `program` (a bare name is looked up on `PATH`).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.stdin(Stdio::null()).kill_on_drop(true);
        command
    }

    fn unavailable(&self, err: std::io::Error) -> MediaError {
        MediaError::new(MediaErrorKind::ToolUnavailable(format!(
            "{}: {}",
            self.program.display(),
            err
        )))
    }
}

impl Default for YtDlpSource {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

fn last_line(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("no diagnostic output")
        .trim()
        .to_string()
}

#[async_trait]
impl MediaSource for YtDlpSource {
    #[instrument(skip(self), fields(program = %self.program.display()))]
    async fn fetch_info(&self, url: &str) -> MediaResult<RawInfo> {
        let output = self
            .command()
            .args(["--dump-single-json", "--no-warnings", url])
            .output()
            .await
            .map_err(|e| self.unavailable(e))?;

        if !output.status.success() {
            let reason = last_line(&output.stderr);
            warn!(status = %output.status, %reason, "Metadata extraction failed");
            return Err(MediaError::new(MediaErrorKind::ToolFailed(reason)));
        }

        let info: RawInfo = serde_json::from_slice(&output.stdout)
            .map_err(|e| MediaError::new(MediaErrorKind::InvalidMetadata(e.to_string())))?;
        debug!(formats = info.formats.len(), "Fetched metadata");
        Ok(info)
    }

    #[instrument(skip(self, args), fields(program = %self.program.display()))]
    async fn open_stream(&self, args: &[String]) -> MediaResult<MediaStream> {
        let mut child = self
            .command()
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.unavailable(e))?;

        let mut stdout = child.stdout.take().ok_or_else(|| {
            MediaError::new(MediaErrorKind::Stream("stdout was not captured".to_string()))
        })?;

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    debug!(target: "tubegate_media::ytdlp", "{}", line);
                }
            });
        }

        // The child moves into the stream so that dropping the stream kills it.
        let stream = async_stream::stream! {
            let mut buf = vec![0u8; CHUNK_SIZE];
            loop {
                match stdout.read(&mut buf).await {
                    Ok(0) => {
                        match child.wait().await {
                            Ok(status) if status.success() => {
                                debug!("Extractor finished");
                            }
                            Ok(status) => {
                                warn!(%status, "Extractor exited unsuccessfully");
                                yield Err(MediaError::new(MediaErrorKind::ToolFailed(
                                    format!("exited with {}", status),
                                )));
                            }
                            Err(e) => {
                                yield Err(MediaError::new(MediaErrorKind::Stream(e.to_string())));
                            }
                        }
                        break;
                    }
                    Ok(n) => yield Ok(buf[..n].to_vec()),
                    Err(e) => {
                        yield Err(MediaError::new(MediaErrorKind::Stream(e.to_string())));
                        break;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_line_skips_blank_trailers() {
        assert_eq!(last_line(b"WARNING: x\nERROR: Video unavailable\n\n"), "ERROR: Video unavailable");
        assert_eq!(last_line(b""), "no diagnostic output");
    }

    #[tokio::test]
    async fn missing_executable_is_unavailable() {
        let source = YtDlpSource::new("/nonexistent/tubegate-yt-dlp");
        let err = source.fetch_info("https://example.com").await.unwrap_err();
        assert!(matches!(err.kind(), MediaErrorKind::ToolUnavailable(_)));
    }
}
