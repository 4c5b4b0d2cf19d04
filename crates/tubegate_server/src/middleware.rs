//! Request middleware: origin check, rate limit, access log.

use crate::{ApiError, AppState, ClientAddr};
use axum::extract::{Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::time::Instant;
use tracing::{Span, info, info_span, warn};

/// Reject requests that do not come from an allowed site.
pub async fn origin_check(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.origins().permits_headers(request.headers()) {
        return ApiError::bad_request("Request from other origin is not allowed").into_response();
    }
    next.run(request).await
}

/// Reject clients that exceed their request rate.
pub async fn rate_limit(
    State(state): State<AppState>,
    client: ClientAddr,
    request: Request,
    next: Next,
) -> Response {
    if let Err(wait) = state.limiter().check(client.as_str()) {
        warn!(client = %client.as_str(), ?wait, "Rate limit exceeded");
        let mut response =
            ApiError::new(StatusCode::TOO_MANY_REQUESTS, "Too many requests, please slow down")
                .into_response();
        let retry_after = wait.as_secs_f64().ceil().max(1.0) as u64;
        if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        return response;
    }
    next.run(request).await
}

/// Span for one request, carrying the method and path only.
///
/// The query string is left out since `/download` takes its token there.
pub fn request_span(request: &Request) -> Span {
    info_span!("request", method = %request.method(), path = %request.uri().path())
}

/// Log method, path, status and latency for every request.
pub async fn logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), ?latency, "Request failed");
    } else {
        info!(%method, %path, status = status.as_u16(), ?latency, "Request served");
    }

    response
}
