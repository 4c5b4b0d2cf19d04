//! Core data types for tubegate.
//!
//! This crate provides the vocabulary shared by the token, media and server
//! crates: what kind of media a client asked for, which quality variant, and
//! the descriptor a capability token authorizes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod descriptor;
mod format;
mod kind;
mod quality;

pub use descriptor::{MediaVariant, ResourceDescriptor};
pub use format::{AudioFormat, AudioQualityLabel, InfoResponse, MediaInfo, VideoFormat};
pub use kind::MediaKind;
pub use quality::{AudioQuality, AudioQualityError, VideoQuality};
