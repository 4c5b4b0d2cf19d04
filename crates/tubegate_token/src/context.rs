//! Immutable per-process token state.

use crate::{AddressBinding, MAX_TTL, TokenConfig, TokenKey};
use aes_gcm::{Aes256Gcm, Key, KeyInit};
use chrono::TimeDelta;
use core::fmt;
use std::time::Duration;
use tracing::{debug, instrument};
use tubegate_error::ConfigError;

/// Everything issuance and verification share: the cipher keyed once at
/// startup, the token lifetime, and the binding strategy.
///
/// Built once and shared behind an `Arc`; nothing in it changes afterwards.
pub struct TokenContext {
    cipher: Aes256Gcm,
    ttl: TimeDelta,
    binding: AddressBinding,
}

impl TokenContext {
    /// Build from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the settings are invalid. This is a
    /// startup failure; a built context cannot fail per request.
    #[instrument(skip_all, fields(ttl_secs = config.ttl_secs, binding = ?config.binding))]
    pub fn from_config(config: &TokenConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let key = TokenKey::derive(config.secret.as_bytes());
        debug!("Derived token key from configured secret");
        Self::new(&key, config.ttl(), config.binding)
    }

    /// Build from an explicit key.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `ttl` is zero or longer than
    /// [`MAX_TTL`], or the binding is invalid.
    pub fn new(key: &TokenKey, ttl: Duration, binding: AddressBinding) -> Result<Self, ConfigError> {
        binding.validate()?;
        if ttl > MAX_TTL {
            return Err(ConfigError::new(format!(
                "token ttl must be at most {}s",
                MAX_TTL.as_secs()
            )));
        }
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|e| ConfigError::new(format!("token ttl out of range: {}", e)))?;
        if ttl <= TimeDelta::zero() {
            return Err(ConfigError::new("token ttl must be greater than zero"));
        }
        Ok(Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes())),
            ttl,
            binding,
        })
    }

    /// Token lifetime.
    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Client binding strategy.
    pub fn binding(&self) -> AddressBinding {
        self.binding
    }

    pub(crate) fn cipher(&self) -> &Aes256Gcm {
        &self.cipher
    }
}

impl fmt::Debug for TokenContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenContext")
            .field("cipher", &"Aes256Gcm([redacted])")
            .field("ttl", &self.ttl)
            .field("binding", &self.binding)
            .finish()
    }
}
