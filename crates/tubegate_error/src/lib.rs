//! Error types for tubegate.
//!
//! This crate provides the foundation error types used throughout the tubegate workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use tubegate_error::{TokenError, TokenErrorKind, TubegateResult};
//!
//! fn redeem() -> TubegateResult<()> {
//!     Err(TokenError::new(TokenErrorKind::Expired))?
//! }
//!
//! match redeem() {
//!     Ok(()) => println!("redeemed"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod media;
mod server;
mod token;

pub use config::ConfigError;
pub use error::{TubegateError, TubegateErrorKind, TubegateResult};
pub use media::{MediaError, MediaErrorKind, MediaResult};
pub use server::{ServerError, ServerErrorKind};
pub use token::{TokenError, TokenErrorKind, TokenResult};
