//! Startup error types.
//!
//! Everything in here is fatal: a `HostError` means the process should not
//! begin accepting traffic. Per-request failures live next to the handler
//! that produces them (see `proxy::forwarder::ForwardError`).

use std::path::PathBuf;

use thiserror::Error;

use crate::config::loader::ConfigError;

pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The directory the site is served from does not exist.
    #[error("site root {} is not an existing directory", .0.display())]
    MissingRoot(PathBuf),

    #[error("failed to list directory '{path}': {source}")]
    Walk {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Two files compiled to patterns that would match the same requests.
    #[error("route '{pattern}' for {conflicting} conflicts with {existing}")]
    RouteConflict {
        pattern: String,
        existing: String,
        conflicting: String,
    },

    #[error("invalid route '{pattern}' for {physical_path}: {reason}")]
    InvalidPattern {
        pattern: String,
        physical_path: String,
        reason: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
