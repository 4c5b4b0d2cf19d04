//! Top-level error wrapper types.

use crate::{ConfigError, MediaError, ServerError, TokenError};

/// Every error the tubegate crates can surface.
///
/// # Examples
///
/// ```
/// use tubegate_error::{TubegateError, ConfigError};
///
/// let config_err = ConfigError::new("missing secret");
/// let err: TubegateError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TubegateErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Capability token refused
    #[from(TokenError)]
    Token(TokenError),
    /// Media extraction or transfer failed
    #[from(MediaError)]
    Media(MediaError),
    /// HTTP service lifecycle error
    #[from(ServerError)]
    Server(ServerError),
}

/// Tubegate error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tubegate Error: {}", _0)]
pub struct TubegateError(Box<TubegateErrorKind>);

impl TubegateError {
    /// Create a new error from a kind.
    pub fn new(kind: TubegateErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TubegateErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TubegateErrorKind
impl<T> From<T> for TubegateError
where
    T: Into<TubegateErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for tubegate operations.
///
/// # Examples
///
/// ```
/// use tubegate_error::{TubegateResult, ConfigError};
///
/// fn load() -> TubegateResult<String> {
///     Err(ConfigError::new("no config"))?
/// }
/// assert!(load().is_err());
/// ```
pub type TubegateResult<T> = std::result::Result<T, TubegateError>;
