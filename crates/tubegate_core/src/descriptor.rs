//! The resource a capability token authorizes.

use crate::{AudioQuality, MediaKind, VideoQuality};

/// Quality selection, typed by media kind.
///
/// Carrying the quality inside the kind makes an audio download with a
/// resolution label (or a video download with an audio level) unrepresentable.
///
/// # Examples
///
/// ```
/// use tubegate_core::{MediaKind, MediaVariant, VideoQuality};
///
/// let variant = MediaVariant::Video(VideoQuality::P720);
/// assert_eq!(variant.kind(), MediaKind::Video);
/// assert_eq!(variant.to_string(), "720p");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::From)]
pub enum MediaVariant {
    /// Audio extraction at an encoder quality level
    Audio(AudioQuality),
    /// Video at a resolution label
    Video(VideoQuality),
}

impl MediaVariant {
    /// The media kind this variant belongs to.
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Audio(_) => MediaKind::Audio,
            Self::Video(_) => MediaKind::Video,
        }
    }
}

/// What a client may download: which item, under which name, at which quality.
///
/// # Examples
///
/// ```
/// use tubegate_core::{MediaKind, ResourceDescriptor, VideoQuality};
///
/// let descriptor = ResourceDescriptor::new("abc123", "Test Video", VideoQuality::P720);
/// assert_eq!(descriptor.id(), "abc123");
/// assert_eq!(descriptor.kind(), MediaKind::Video);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct ResourceDescriptor {
    /// Opaque identifier of the source media item
    id: String,
    /// Display title, used for naming the downloaded file
    title: String,
    /// Requested quality
    variant: MediaVariant,
}

impl ResourceDescriptor {
    /// Create a descriptor.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        variant: impl Into<MediaVariant>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            variant: variant.into(),
        }
    }

    /// The media kind, implied by the variant.
    pub fn kind(&self) -> MediaKind {
        self.variant.kind()
    }
}
