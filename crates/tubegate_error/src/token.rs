//! Capability token error types.

/// Reasons a token is refused.
///
/// Every kind is a client-input fault and terminal for the token that caused
/// it; the only remedy is asking the metadata endpoint for a fresh token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum TokenErrorKind {
    /// The token is not structurally a token produced by this service
    #[display("Malformed token: {}", _0)]
    Malformed(String),
    /// Authenticated decryption failed
    #[display("Invalid or tampered token")]
    Tampered,
    /// The token is authentic but its validity window has passed
    #[display("Token expired")]
    Expired,
    /// The token is authentic but was issued to a different client
    #[display("Token not for this client address")]
    AddressMismatch,
}

/// Token error with location tracking.
///
/// # Examples
///
/// ```
/// use tubegate_error::{TokenError, TokenErrorKind};
///
/// let err = TokenError::new(TokenErrorKind::Expired);
/// assert_eq!(err.kind(), &TokenErrorKind::Expired);
/// assert!(format!("{}", err).contains("expired"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Token Error: {} at line {} in {}", kind, line, file)]
pub struct TokenError {
    /// The kind of error that occurred
    pub kind: TokenErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TokenError {
    /// Create a new token error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TokenErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a [`TokenErrorKind::Malformed`] error.
    #[track_caller]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::new(TokenErrorKind::Malformed(reason.into()))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TokenErrorKind {
        &self.kind
    }
}

/// Result type for token operations.
pub type TokenResult<T> = Result<T, TokenError>;
