//! Token redemption.

use crate::claims::Claims;
use crate::{Clock, SystemClock, TokenContext, envelope};
use std::sync::Arc;
use tracing::{debug, instrument};
use tubegate_core::ResourceDescriptor;
use tubegate_error::{TokenError, TokenErrorKind, TokenResult};

/// Opens bearer tokens and checks they may be redeemed by the caller.
#[derive(Debug, Clone)]
pub struct TokenVerifier {
    context: Arc<TokenContext>,
    clock: Arc<dyn Clock>,
}

impl TokenVerifier {
    /// Verify against the system clock.
    pub fn new(context: Arc<TokenContext>) -> Self {
        Self {
            context,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Recover the descriptor sealed in `token` if `client_addr` may redeem it now.
    ///
    /// # Errors
    ///
    /// - [`TokenErrorKind::Malformed`]: empty, not base64url, too short, or the
    ///   authenticated record is not one this service writes
    /// - [`TokenErrorKind::Tampered`]: the authentication tag does not verify
    /// - [`TokenErrorKind::Expired`]: the current time is at or past expiry
    /// - [`TokenErrorKind::AddressMismatch`]: issued to a different client
    #[instrument(skip(self, token), fields(token_len = token.len()))]
    pub fn verify(&self, token: &str, client_addr: &str) -> TokenResult<ResourceDescriptor> {
        let plaintext = envelope::open(self.context.cipher(), token)?;
        debug!("Token authenticated");

        let (claims, variant) = Claims::from_bytes(&plaintext)?;

        let expiry = claims.expiry()?;
        let now = self.clock.now();
        if now >= expiry {
            debug!(%expiry, %now, "Token past expiry");
            return Err(TokenError::new(TokenErrorKind::Expired));
        }

        if !self.context.binding().matches(claims.addr(), client_addr) {
            debug!(bound = claims.addr(), "Token bound to another client");
            return Err(TokenError::new(TokenErrorKind::AddressMismatch));
        }

        Ok(claims.into_descriptor(variant))
    }
}
