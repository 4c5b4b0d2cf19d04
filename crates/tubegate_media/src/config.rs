//! Media settings.

use crate::AudioSelection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_ytdlp_path() -> PathBuf {
    PathBuf::from("yt-dlp")
}

fn default_min_video_height() -> u32 {
    240
}

/// Settings for the extractor and the catalog.
///
/// ```toml
/// [media]
/// ytdlp_path = "yt-dlp"
/// audio_selection = "best-only"
/// min_video_height = 240
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Path or name of the `yt-dlp` executable
    #[serde(default = "default_ytdlp_path")]
    pub ytdlp_path: PathBuf,

    /// How many audio options to offer
    #[serde(default)]
    pub audio_selection: AudioSelection,

    /// Smallest video height offered
    #[serde(default = "default_min_video_height")]
    pub min_video_height: u32,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: default_ytdlp_path(),
            audio_selection: AudioSelection::default(),
            min_video_height: default_min_video_height(),
        }
    }
}
