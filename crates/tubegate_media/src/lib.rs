//! Media collaborators around the token core.
//!
//! - [`Catalog`] turns extractor metadata into download options, issuing one
//!   capability token per option.
//! - [`Transfer`] turns a redeemed descriptor into a byte stream plus the
//!   headers that name it.
//! - [`MediaSource`] is the seam to the extractor; [`YtDlpSource`] shells out
//!   to `yt-dlp`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod metadata;
mod size;
mod source;
mod transfer;
mod url;

pub use catalog::{AudioSelection, Catalog};
pub use config::MediaConfig;
pub use metadata::{RawFormat, RawInfo};
pub use size::{estimate_filesize, format_duration, format_filesize};
pub use source::{MediaSource, MediaStream, YtDlpSource};
pub use transfer::{Download, Transfer, TransferPlan, sanitize_filename};
pub use url::watch_url;
