//! Quality selectors for each media kind.

use serde::{Deserialize, Serialize};

/// Resolution labels offered for video downloads, ordered lowest to highest.
///
/// # Examples
///
/// ```
/// use tubegate_core::VideoQuality;
/// use std::str::FromStr;
///
/// let q = VideoQuality::from_str("720p").unwrap();
/// assert_eq!(q.height(), 720);
/// assert_eq!(q.to_string(), "720p");
/// assert_eq!(VideoQuality::from_height(1080), Some(VideoQuality::P1080));
/// assert_eq!(VideoQuality::from_height(1000), None);
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
    strum::AsRefStr,
)]
pub enum VideoQuality {
    /// 144 lines
    #[serde(rename = "144p")]
    #[strum(serialize = "144p")]
    P144,
    /// 240 lines
    #[serde(rename = "240p")]
    #[strum(serialize = "240p")]
    P240,
    /// 360 lines
    #[serde(rename = "360p")]
    #[strum(serialize = "360p")]
    P360,
    /// 480 lines
    #[serde(rename = "480p")]
    #[strum(serialize = "480p")]
    P480,
    /// 720 lines (HD)
    #[serde(rename = "720p")]
    #[strum(serialize = "720p")]
    P720,
    /// 1080 lines (Full HD)
    #[serde(rename = "1080p")]
    #[strum(serialize = "1080p")]
    P1080,
    /// 1440 lines (2K)
    #[serde(rename = "1440p")]
    #[strum(serialize = "1440p")]
    P1440,
    /// 2160 lines (4K)
    #[serde(rename = "2160p")]
    #[strum(serialize = "2160p")]
    P2160,
}

impl VideoQuality {
    /// Vertical resolution in pixels.
    pub fn height(self) -> u32 {
        match self {
            Self::P144 => 144,
            Self::P240 => 240,
            Self::P360 => 360,
            Self::P480 => 480,
            Self::P720 => 720,
            Self::P1080 => 1080,
            Self::P1440 => 1440,
            Self::P2160 => 2160,
        }
    }

    /// The label whose height is exactly `height`, if it is one we offer.
    pub fn from_height(height: u32) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|q| q.height() == height)
    }

    /// Marketing label shown next to the resolution ("4K", "HD", ...).
    ///
    /// Resolutions below 720p have no label.
    pub fn human_label(self) -> &'static str {
        match self.height() {
            h if h >= 2160 => "4K",
            h if h >= 1440 => "2K",
            h if h >= 1080 => "FHD",
            h if h >= 720 => "HD",
            _ => "",
        }
    }
}

/// Error for an audio quality outside the 0–10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display("audio quality {} is outside 0..=10", _0)]
pub struct AudioQualityError(pub u64);

impl std::error::Error for AudioQualityError {}

/// Audio quality selector on the encoder's 0–10 scale, 0 being best.
///
/// # Examples
///
/// ```
/// use tubegate_core::AudioQuality;
///
/// assert_eq!(AudioQuality::new(3).unwrap().level(), 3);
/// assert!(AudioQuality::new(11).is_err());
/// assert_eq!(AudioQuality::saturating(-2.0), AudioQuality::BEST);
/// assert_eq!(AudioQuality::saturating(4.6).level(), 5);
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
    derive_more::Display,
)]
#[serde(try_from = "u64", into = "u8")]
pub struct AudioQuality(u8);

impl AudioQuality {
    /// Highest quality.
    pub const BEST: Self = Self(0);
    /// Lowest quality.
    pub const WORST: Self = Self(10);

    /// Validate a level on the 0–10 scale.
    pub fn new(level: u8) -> Result<Self, AudioQualityError> {
        Self::try_from(u64::from(level))
    }

    /// Round and clamp an arbitrary score into the scale.
    ///
    /// Extractors report quality as a float that can fall outside the scale.
    pub fn saturating(score: f64) -> Self {
        if score.is_nan() {
            return Self::BEST;
        }
        let clamped = score.round().clamp(0.0, f64::from(Self::WORST.0));
        Self(clamped as u8)
    }

    /// The numeric level.
    pub fn level(self) -> u8 {
        self.0
    }
}

impl TryFrom<u64> for AudioQuality {
    type Error = AudioQualityError;

    fn try_from(level: u64) -> Result<Self, Self::Error> {
        if level > u64::from(Self::WORST.0) {
            return Err(AudioQualityError(level));
        }
        Ok(Self(level as u8))
    }
}

impl From<AudioQuality> for u8 {
    fn from(quality: AudioQuality) -> Self {
        quality.0
    }
}
