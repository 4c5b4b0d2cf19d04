//! Media extraction and transfer error types.

/// Kinds of media errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MediaErrorKind {
    /// The media identifier is not acceptable for the upstream source
    #[display("Invalid media id: {}", _0)]
    InvalidId(String),
    /// The identifier resolves to a playlist rather than a single item
    #[display("Playlists are not supported. Please provide a single video URL.")]
    PlaylistUnsupported,
    /// The external extraction tool could not be launched
    #[display("Extraction tool unavailable: {}", _0)]
    ToolUnavailable(String),
    /// The external extraction tool exited unsuccessfully
    #[display("Extraction tool failed: {}", _0)]
    ToolFailed(String),
    /// Metadata emitted by the tool could not be understood
    #[display("Invalid metadata: {}", _0)]
    InvalidMetadata(String),
    /// Reading the transfer stream failed
    #[display("Stream error: {}", _0)]
    Stream(String),
}

/// Media error with location tracking.
///
/// # Examples
///
/// ```
/// use tubegate_error::{MediaError, MediaErrorKind};
///
/// let err = MediaError::new(MediaErrorKind::PlaylistUnsupported);
/// assert!(format!("{}", err).contains("Playlists"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Error: {} at line {} in {}", kind, line, file)]
pub struct MediaError {
    /// The kind of error that occurred
    pub kind: MediaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MediaError {
    /// Create a new media error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MediaErrorKind {
        &self.kind
    }
}

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;
