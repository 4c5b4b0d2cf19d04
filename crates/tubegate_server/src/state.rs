//! Shared request state.

use crate::{ClientLimiter, OriginPolicy, ServiceConfig};
use std::sync::Arc;
use tracing::{info, instrument};
use tubegate_error::TubegateResult;
use tubegate_media::{Catalog, MediaSource, Transfer, YtDlpSource};
use tubegate_token::{Clock, SystemClock, TokenContext, TokenIssuer, TokenVerifier};

/// Everything a handler needs, cheap to clone per request.
#[derive(Debug, Clone)]
pub struct AppState {
    catalog: Catalog,
    transfer: Transfer,
    verifier: TokenVerifier,
    origins: Arc<OriginPolicy>,
    limiter: Arc<ClientLimiter>,
    trust_proxy: bool,
}

impl AppState {
    /// State backed by `yt-dlp` and the system clock.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token or rate limit settings are
    /// unusable.
    pub fn from_config(config: &ServiceConfig) -> TubegateResult<Self> {
        let source = Arc::new(YtDlpSource::new(config.media.ytdlp_path.clone()));
        Self::from_parts(config, source, Arc::new(SystemClock))
    }

    /// State with an explicit media source and clock.
    #[instrument(skip_all)]
    pub fn from_parts(
        config: &ServiceConfig,
        source: Arc<dyn MediaSource>,
        clock: Arc<dyn Clock>,
    ) -> TubegateResult<Self> {
        let context = Arc::new(TokenContext::from_config(&config.token)?);
        let issuer = TokenIssuer::new(context.clone()).with_clock(clock.clone());
        let verifier = TokenVerifier::new(context).with_clock(clock);
        let origins = OriginPolicy::new(&config.cors.allowed_origins);

        info!(
            ttl_secs = config.token.ttl_secs,
            binding = ?config.token.binding,
            origin_check = origins.is_enabled(),
            trust_proxy = config.server.trust_proxy,
            "Service state ready"
        );

        Ok(Self {
            catalog: Catalog::new(source.clone(), issuer, &config.media),
            transfer: Transfer::new(source),
            verifier,
            origins: Arc::new(origins),
            limiter: Arc::new(ClientLimiter::new(&config.rate_limit)?),
            trust_proxy: config.server.trust_proxy,
        })
    }

    /// Metadata catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Download starter.
    pub fn transfer(&self) -> &Transfer {
        &self.transfer
    }

    /// Token verifier.
    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Origin allowlist.
    pub fn origins(&self) -> &OriginPolicy {
        &self.origins
    }

    /// Per-client limiter.
    pub fn limiter(&self) -> &Arc<ClientLimiter> {
        &self.limiter
    }

    /// Whether `X-Forwarded-For` is trusted.
    pub fn trust_proxy(&self) -> bool {
        self.trust_proxy
    }
}
