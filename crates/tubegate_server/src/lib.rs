//! HTTP service for two-step media downloads.
//!
//! `GET /info` lists download options for a media item, each carrying a
//! capability token bound to the caller's address; `GET /download` redeems one
//! token and streams the authorized rendition.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod limiter;
pub mod middleware;
mod observability;
mod origin;
pub mod routes;
mod server;
mod state;

pub use client::ClientAddr;
pub use config::{CorsConfig, LogConfig, RateLimitConfig, ServerSettings, ServiceConfig};
pub use error::ApiError;
pub use limiter::ClientLimiter;
pub use observability::init_observability;
pub use origin::OriginPolicy;
pub use server::{create_app, serve, serve_on};
pub use state::AppState;
