//! Client address extraction.

use crate::{ApiError, AppState};
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use std::net::SocketAddr;

const FORWARDED_FOR: &str = "x-forwarded-for";

/// The address a request is attributed to, for token binding and rate limits.
///
/// This is the socket peer, or the leftmost `X-Forwarded-For` entry when the
/// service is configured to trust its proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientAddr(pub String);

impl ClientAddr {
    /// Resolve from the peer address and request headers.
    pub fn resolve(peer: Option<SocketAddr>, forwarded_for: Option<&str>, trust_proxy: bool) -> Option<Self> {
        if trust_proxy {
            let forwarded = forwarded_for
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty());
            if let Some(addr) = forwarded {
                return Some(Self(addr.to_string()));
            }
        }
        peer.map(|p| Self(p.ip().to_string()))
    }

    /// The address text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for ClientAddr {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(addr) = parts.extensions.get::<ClientAddr>() {
            return Ok(addr.clone());
        }

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        let forwarded_for = parts
            .headers
            .get(FORWARDED_FOR)
            .and_then(|v| v.to_str().ok());

        let addr = Self::resolve(peer, forwarded_for, state.trust_proxy())
            .ok_or_else(|| ApiError::internal("client address unavailable"))?;
        parts.extensions.insert(addr.clone());
        Ok(addr)
    }
}
