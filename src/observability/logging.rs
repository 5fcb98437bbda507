//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global tracing subscriber from configuration
//! - Honour `RUST_LOG` over the configured level
//!
//! # Design Decisions
//! - Pretty output for development, JSON for log shippers
//! - A bare level (`debug`) applies to this crate and tower-http; anything
//!   containing directives is passed to `EnvFilter` unchanged

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

pub use tracing_subscriber::util::TryInitError;

/// Install the global subscriber. Fails if one is already installed.
pub fn init(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    }
}

/// Expand a configured level into filter directives.
pub fn default_directives(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("export_host={level},tower_http={level}")
    }
}
