//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the host.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the export host.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HostConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where the exported site lives on disk.
    pub site: SiteConfig,

    /// Dev server proxying.
    pub dev_server: DevServerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Location of the exported site.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base directory that `root_path` is resolved against.
    pub content_root: String,

    /// Relative path from `content_root` to the exported files.
    ///
    /// Empty means the content root itself. Rooted paths are rejected.
    pub root_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_root: ".".to_string(),
            root_path: String::new(),
        }
    }
}

/// Dev server proxy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DevServerConfig {
    /// Forward every request to `origin` instead of serving files.
    pub proxy_to_dev_server: bool,

    /// Absolute origin of the dev server (e.g., "http://localhost:3000").
    pub origin: Option<String>,

    /// Maximum idle time while waiting on the dev server, in seconds.
    pub activity_timeout_secs: u64,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            proxy_to_dev_server: false,
            origin: None,
            // Dev servers can sit compiling for a long while on first hit.
            activity_timeout_secs: 300,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout for static pages and assets, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error) or a full filter directive.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
