//! Stateless capability tokens for two-step media downloads.
//!
//! The metadata endpoint issues one token per offered download option; the
//! download endpoint later redeems exactly one. Nothing is stored between the
//! two requests: the token itself carries what was authorized, for whom, and
//! until when, sealed with AES-256-GCM under a key derived from the process
//! secret.
//!
//! # Wire format
//!
//! ```text
//! base64url_nopad( nonce[12] ‖ ciphertext ‖ tag[16] )
//! ```
//!
//! The ciphertext decrypts to a compact JSON record holding the descriptor,
//! the client address the token is bound to, and the expiry in Unix
//! milliseconds.
//!
//! # Verification order
//!
//! 1. structure (base64url, minimum length)
//! 2. authenticity (GCM tag)
//! 3. record parsing and kind/variant typing
//! 4. expiry
//! 5. client binding
//!
//! Nothing inside the record is looked at until the tag has verified.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tubegate_core::{ResourceDescriptor, VideoQuality};
//! use tubegate_token::{TokenConfig, TokenContext, TokenIssuer, TokenVerifier};
//!
//! let context = Arc::new(TokenContext::from_config(&TokenConfig::new("s3cret"))?);
//! let issuer = TokenIssuer::new(context.clone());
//! let verifier = TokenVerifier::new(context);
//!
//! let descriptor = ResourceDescriptor::new("abc123", "Test Video", VideoQuality::P720);
//! let token = issuer.issue(&descriptor, "1.2.3.4")?;
//! assert_eq!(verifier.verify(&token, "1.2.3.4")?, descriptor);
//! assert!(verifier.verify(&token, "5.6.7.8").is_err());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod binding;
mod claims;
mod clock;
mod config;
mod context;
mod envelope;
mod issuer;
mod key;
mod nonce;
mod verifier;

pub use binding::AddressBinding;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DEFAULT_TTL, MAX_TTL, TokenConfig};
pub use context::TokenContext;
pub use envelope::TAG_SIZE;
pub use issuer::TokenIssuer;
pub use key::{TOKEN_KEY_SIZE, TokenKey};
pub use nonce::{FixedNonceSource, NONCE_SIZE, NonceSource, OsNonceSource};
pub use verifier::TokenVerifier;

pub use tubegate_error::{TokenError, TokenErrorKind, TokenResult};
