//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::{error, warn};
use tubegate_error::{MediaError, MediaErrorKind, TokenError, TokenErrorKind, TubegateError, TubegateErrorKind};

/// An error response: a status and a client-facing message.
///
/// Rendered as `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Response with an arbitrary status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// 500; the detail is logged, not sent.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(%detail, "Internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    /// Response for a refused token.
    pub fn token(err: &TokenError) -> Self {
        warn!(error = %err.kind(), "Token refused");
        match err.kind() {
            TokenErrorKind::Malformed(_) => Self::bad_request("Malformed token"),
            TokenErrorKind::Tampered => Self::new(StatusCode::FORBIDDEN, "Invalid or tampered token"),
            TokenErrorKind::Expired => Self::new(StatusCode::GONE, "Token expired"),
            TokenErrorKind::AddressMismatch => Self::new(StatusCode::FORBIDDEN, "Token not for this IP"),
        }
    }

    /// Response for a failed metadata lookup.
    pub fn info(err: &TubegateError) -> Self {
        match err.kind() {
            TubegateErrorKind::Media(media) => Self::media(media, "Failed to fetch video information"),
            _ => Self::internal(err),
        }
    }

    /// Response for a download that could not start.
    pub fn download(err: &MediaError) -> Self {
        Self::media(err, "Failed to stream video")
    }

    fn media(err: &MediaError, upstream_message: &str) -> Self {
        match err.kind() {
            MediaErrorKind::InvalidId(_) => Self::bad_request("Invalid video id"),
            MediaErrorKind::PlaylistUnsupported => Self::bad_request(err.kind().to_string()),
            MediaErrorKind::ToolUnavailable(_)
            | MediaErrorKind::ToolFailed(_)
            | MediaErrorKind::InvalidMetadata(_)
            | MediaErrorKind::Stream(_) => {
                error!(error = %err, "Extractor failure");
                Self::new(StatusCode::BAD_GATEWAY, upstream_message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
