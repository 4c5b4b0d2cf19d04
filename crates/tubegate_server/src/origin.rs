//! Same-site request check.

use axum::http::{HeaderMap, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

/// Origins allowed to call the metadata and download endpoints.
///
/// A request passes when its `Origin` is allowed, or its `Referer` is an
/// allowed origin or a URL under one. An empty allowlist admits everything.
///
/// # Examples
///
/// ```
/// use tubegate_server::OriginPolicy;
///
/// let policy = OriginPolicy::new(["https://app.example.com/"]);
/// assert!(policy.permits(Some("https://app.example.com"), None));
/// assert!(policy.permits(None, Some("https://app.example.com/watch?v=1")));
/// assert!(!policy.permits(None, Some("https://app.example.com.evil.test/")));
/// assert!(!policy.permits(None, None));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginPolicy {
    allowed: Vec<String>,
}

impl OriginPolicy {
    /// Allow the given origins; trailing slashes are ignored.
    pub fn new<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = origins
            .into_iter()
            .map(|o| o.as_ref().trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();
        Self { allowed }
    }

    /// Whether the check is active.
    pub fn is_enabled(&self) -> bool {
        !self.allowed.is_empty()
    }

    /// Decide on the raw `Origin` and `Referer` header values.
    pub fn permits(&self, origin: Option<&str>, referer: Option<&str>) -> bool {
        if !self.is_enabled() {
            return true;
        }

        let origin_ok = origin.is_some_and(|o| {
            let o = o.trim_end_matches('/');
            self.allowed.iter().any(|a| a == o)
        });
        let referer_ok = referer.is_some_and(|r| {
            self.allowed.iter().any(|a| {
                r == a || r.strip_prefix(a.as_str()).is_some_and(|rest| rest.starts_with('/'))
            })
        });
        origin_ok || referer_ok
    }

    /// Decide on a request's headers.
    pub fn permits_headers(&self, headers: &HeaderMap) -> bool {
        let value = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok());
        let allowed = self.permits(value(header::ORIGIN), value(header::REFERER));
        if !allowed {
            warn!(
                origin = value(header::ORIGIN).unwrap_or("-"),
                referer = value(header::REFERER).unwrap_or("-"),
                "Rejected cross-origin request"
            );
        }
        allowed
    }

    /// CORS layer advertising the same allowlist.
    ///
    /// With an empty allowlist any origin may read responses.
    pub fn cors_layer(&self) -> CorsLayer {
        let cors = CorsLayer::new().allow_methods([Method::GET, Method::OPTIONS]);
        if !self.is_enabled() {
            return cors.allow_origin(AllowOrigin::any());
        }

        let origins: Vec<HeaderValue> = self
            .allowed
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %o, "Skipping unparsable CORS origin");
                    None
                }
            })
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}
