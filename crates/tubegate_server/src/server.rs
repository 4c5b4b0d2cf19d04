//! Router assembly and the serve loop.

use crate::{AppState, ServiceConfig, middleware, routes};
use axum::Router;
use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use tubegate_error::{ServerError, ServerErrorKind, TubegateResult};

const LIMITER_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Build the application router.
///
/// `/info` and `/download` sit behind the origin check; everything except
/// `/health` is rate limited per client.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    let cors = state.origins().cors_layer();

    let guarded = Router::new()
        .route("/info", get(routes::info))
        .route("/download", get(routes::download))
        .route_layer(from_fn_with_state(state.clone(), middleware::origin_check));

    Router::new()
        .route("/", get(routes::root))
        .merge(guarded)
        .route_layer(from_fn_with_state(state.clone(), middleware::rate_limit))
        .route("/health", get(routes::health_check))
        .layer(from_fn(middleware::logging))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::request_span))
        .layer(cors)
        .with_state(state)
}

/// Bind `config.server` and serve until Ctrl-C.
pub async fn serve(config: &ServiceConfig, state: AppState) -> TubegateResult<()> {
    let addr = config.server.bind_addr()?;
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            addr: addr.to_string(),
            reason: e.to_string(),
        })
    })?;
    info!(%addr, "Starting tubegate server");
    serve_on(listener, state, config.server.request_timeout()).await
}

/// Serve on an already bound listener until Ctrl-C.
pub async fn serve_on(
    listener: TcpListener,
    state: AppState,
    request_timeout: Duration,
) -> TubegateResult<()> {
    let limiter = state.limiter().clone();
    let sweeper = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(LIMITER_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            limiter.retain_recent();
            debug!(tracked = limiter.tracked(), "Swept rate limiter");
        }
    });

    let app = create_app(state, request_timeout);
    let result = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())).into());

    sweeper.abort();
    info!("Server stopped");
    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
