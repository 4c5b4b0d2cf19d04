//! Token settings as loaded from configuration.

use crate::AddressBinding;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tubegate_error::ConfigError;

/// Default token lifetime: 15 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Longest accepted token lifetime: 30 days.
pub const MAX_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL.as_secs()
}

/// Settings for issuing and verifying tokens.
///
/// # Example
///
/// ```toml
/// [token]
/// secret = "change-me"
/// ttl_secs = 900
///
/// [token.binding]
/// mode = "exact"
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Process secret; hashed into the AES-256 key
    #[serde(default)]
    pub secret: String,

    /// Token lifetime in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Client binding strategy
    #[serde(default)]
    pub binding: AddressBinding,
}

impl TokenConfig {
    /// Settings with the given secret and defaults otherwise.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs: default_ttl_secs(),
            binding: AddressBinding::default(),
        }
    }

    /// Override the lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl_secs = ttl.as_secs();
        self
    }

    /// Override the binding strategy.
    pub fn with_binding(mut self, binding: AddressBinding) -> Self {
        self.binding = binding;
        self
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is empty, the lifetime is zero or longer
    /// than [`MAX_TTL`], or the binding has an impossible prefix length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::new(
                "token secret is not set (set TUBEGATE_TOKEN__SECRET or [token].secret)",
            ));
        }
        if self.ttl_secs == 0 {
            return Err(ConfigError::new("token ttl_secs must be greater than zero"));
        }
        if self.ttl_secs > MAX_TTL.as_secs() {
            return Err(ConfigError::new(format!(
                "token ttl_secs must be at most {}",
                MAX_TTL.as_secs()
            )));
        }
        self.binding.validate()
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[redacted]")
            .field("ttl_secs", &self.ttl_secs)
            .field("binding", &self.binding)
            .finish()
    }
}
