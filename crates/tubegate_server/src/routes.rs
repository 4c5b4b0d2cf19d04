//! Route handlers.

use crate::{ApiError, AppState, ClientAddr};
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use tracing::{debug, instrument};
use tubegate_core::{InfoResponse, MediaKind};

/// `GET /`
pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": "server is running ..." }))
}

/// `GET /health`
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "tubegate",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// Query of `GET /info`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoQuery {
    id: Option<String>,
    download_type: Option<String>,
}

/// `GET /info?id=..&downloadType=audio|video`
///
/// Lists download options for the item, each with a token bound to the caller.
#[instrument(skip(state, query), fields(client = %client.as_str()))]
pub async fn info(
    State(state): State<AppState>,
    client: ClientAddr,
    Query(query): Query<InfoQuery>,
) -> Result<Json<InfoResponse>, ApiError> {
    let id = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("ID is required"))?;
    let kind = query
        .download_type
        .as_deref()
        .and_then(|t| MediaKind::from_str(t).ok())
        .ok_or_else(|| ApiError::bad_request("downloadType is required"))?;

    let info = state
        .catalog()
        .describe(id, kind, client.as_str())
        .await
        .map_err(|e| ApiError::info(&e))?;
    debug!(title = %info.title, "Metadata served");
    Ok(Json(info.into()))
}

/// Query of `GET /download`.
#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    token: Option<String>,
}

/// `GET /download?token=..`
///
/// Redeems a token and streams the authorized media.
#[instrument(skip(state, query), fields(client = %client.as_str()))]
pub async fn download(
    State(state): State<AppState>,
    client: ClientAddr,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let token = query
        .token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::bad_request("Token is required"))?;

    let descriptor = state
        .verifier()
        .verify(token, client.as_str())
        .map_err(|e| ApiError::token(&e))?;

    let download = state
        .transfer()
        .start(&descriptor)
        .await
        .map_err(|e| ApiError::download(&e))?;

    let disposition =
        HeaderValue::from_str(&download.plan.content_disposition()).map_err(ApiError::internal)?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, download.plan.content_type())
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from_stream(download.stream))
        .map_err(ApiError::internal)
}
