//! Token issuance.

use crate::claims::Claims;
use crate::{Clock, NonceSource, OsNonceSource, SystemClock, TokenContext, envelope};
use std::sync::Arc;
use tracing::{debug, instrument};
use tubegate_core::ResourceDescriptor;
use tubegate_error::{TokenError, TokenResult};

/// Seals resource descriptors into bearer tokens bound to a client address.
///
/// Cheap to clone; clones share the same context.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    context: Arc<TokenContext>,
    clock: Arc<dyn Clock>,
    nonces: Arc<dyn NonceSource>,
}

impl TokenIssuer {
    /// Issue with the system clock and OS randomness.
    pub fn new(context: Arc<TokenContext>) -> Self {
        Self {
            context,
            clock: Arc::new(SystemClock),
            nonces: Arc::new(OsNonceSource),
        }
    }

    /// Replace the clock used to stamp expiry.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the nonce source.
    pub fn with_nonce_source(mut self, nonces: Arc<dyn NonceSource>) -> Self {
        self.nonces = nonces;
        self
    }

    /// Seal `descriptor` for `client_addr`, valid for the context's TTL from now.
    ///
    /// Every call draws a fresh nonce, so issuing the same descriptor twice
    /// gives two different tokens.
    ///
    /// # Errors
    ///
    /// Fails if the expiry falls outside the representable time range, or if
    /// the record cannot be serialized or sealed. Neither happens for a
    /// context built through [`TokenContext::new`] and a sane clock.
    #[instrument(
        skip(self, descriptor),
        fields(id = %descriptor.id(), kind = %descriptor.kind(), variant = %descriptor.variant())
    )]
    pub fn issue(&self, descriptor: &ResourceDescriptor, client_addr: &str) -> TokenResult<String> {
        let expiry = self
            .clock
            .now()
            .checked_add_signed(self.context.ttl())
            .ok_or_else(|| TokenError::malformed("token expiry out of range"))?;
        let plaintext = Claims::new(descriptor, client_addr, expiry).to_bytes()?;
        let nonce = self.nonces.next_nonce();
        let token = envelope::seal(self.context.cipher(), &nonce, &plaintext)?;
        debug!(%expiry, len = token.len(), "Issued token");
        Ok(token)
    }
}
