//! Service configuration.
//!
//! Sources, later ones overriding earlier ones:
//! - Bundled defaults (`tubegate.toml`, compiled in)
//! - `~/.config/tubegate/tubegate.toml`
//! - `./tubegate.toml`, or the file passed with `--config`
//! - `TUBEGATE_<SECTION>__<KEY>` environment variables

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, instrument};
use tubegate_error::{ConfigError, TubegateResult};
use tubegate_media::MediaConfig;
use tubegate_token::TokenConfig;

const DEFAULT_CONFIG: &str = include_str!("../tubegate.toml");

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Interface to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
    /// Take the client address from `X-Forwarded-For` instead of the socket
    pub trust_proxy: bool,
    /// Upper bound on producing response headers, in seconds
    pub request_timeout_secs: u64,
}

impl ServerSettings {
    /// Socket address to bind.
    pub fn bind_addr(&self) -> TubegateResult<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| ConfigError::new(format!("Invalid listen address {}: {}", addr, e)).into())
    }

    /// Request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Browser origins allowed to call the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Exact origins such as `https://app.example.com`; empty disables checks
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Per-client request rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Sustained requests per second per client
    pub requests_per_second: u32,
    /// Requests a client may make back to back
    pub burst: u32,
}

/// Log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

/// Everything the service reads at startup.
///
/// # Example
///
/// ```no_run
/// use tubegate_server::ServiceConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ServiceConfig::load(None)?;
/// println!("listening on {}", config.server.bind_addr()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Listener
    pub server: ServerSettings,
    /// Token issuance and verification
    pub token: TokenConfig,
    /// Origin allowlist
    #[serde(default)]
    pub cors: CorsConfig,
    /// Per-client rate limit
    pub rate_limit: RateLimitConfig,
    /// Extractor and catalog
    #[serde(default)]
    pub media: MediaConfig,
    /// Logging
    pub log: LogConfig,
}

impl ServiceConfig {
    /// Load from every source, reading overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be parsed, an explicit file is
    /// missing, or the merged settings fail [`ServiceConfig::validate`].
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> TubegateResult<Self> {
        Self::load_with_env(explicit, None)
    }

    /// Load with environment overrides taken from `env` when given.
    ///
    /// Keys in `env` use the same `TUBEGATE_SECTION__KEY` names as the
    /// process environment.
    #[instrument(skip(env))]
    pub fn load_with_env(
        explicit: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> TubegateResult<Self> {
        debug!("Loading configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/tubegate/tubegate.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = match explicit {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name("tubegate").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("TUBEGATE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins")
                .source(env),
        );

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Check the merged settings are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.token.validate()?;
        if self.rate_limit.requests_per_second == 0 || self.rate_limit.burst == 0 {
            return Err(ConfigError::new(
                "rate_limit requests_per_second and burst must be greater than zero",
            ));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::new(
                "server request_timeout_secs must be greater than zero",
            ));
        }
        Ok(())
    }
}
