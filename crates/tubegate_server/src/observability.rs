//! Structured logging setup.

use crate::LogConfig;
use tracing_subscriber::{EnvFilter, layer::{Layer, SubscriberExt}, util::SubscriberInitExt};
use tubegate_error::{ServerError, ServerErrorKind, TubegateResult};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_observability(config: &LogConfig) -> TubegateResult<()> {
    let observability = |reason: String| ServerError::new(ServerErrorKind::Observability(reason));

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| observability(e.to_string()))?;

    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| observability(e.to_string()))?;

    Ok(())
}
