//! Static export host (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                  EXPORT HOST                     │
//!                      │                                                  │
//!   Client Request     │  ┌──────────┐    ┌────────────┐                  │
//!   ───────────────────┼─▶│   http   │───▶│   mode?    │                  │
//!                      │  │  server  │    └─────┬──────┘                  │
//!                      │  └──────────┘    static│        proxy           │
//!                      │                        ▼           ▼             │
//!                      │               ┌────────────┐ ┌────────────┐      │
//!                      │               │  routing   │ │   proxy    │──────┼──▶ Dev
//!                      │               │ PageRouter │ │ forwarder  │◀─────┼─── Server
//!                      │               └─────┬──────┘ └────────────┘      │
//!                      │                     ▼                            │
//!                      │               ┌────────────┐                     │
//!   Client Response    │               │    site    │                     │
//!   ◀──────────────────┼───────────────│  ServeDir  │◀── exported files   │
//!                      │               └────────────┘                     │
//!                      │                                                  │
//!                      │  config · observability · lifecycle              │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use export_host::config::{read_config, validate_config, ConfigError, ObservabilityConfig};
use export_host::lifecycle::run_until_signal;
use export_host::observability::logging;
use export_host::HostConfig;

/// Serve a statically exported site, or proxy it to a dev server.
#[derive(Debug, Parser)]
#[command(name = "export-host", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the site root path is resolved against.
    #[arg(long)]
    content_root: Option<String>,

    /// Site directory, relative to the content root.
    #[arg(long)]
    root: Option<String>,

    /// Address to listen on.
    #[arg(long)]
    bind: Option<String>,

    /// Dev server origin (e.g. http://localhost:3000).
    #[arg(long)]
    dev_server: Option<String>,

    /// Forward every request to the dev server.
    #[arg(long)]
    proxy: bool,

    /// Log level or filter directives; RUST_LOG takes precedence.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    /// Read the config file (if any), apply flags, then validate.
    fn into_config(self) -> Result<HostConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => HostConfig::default(),
        };

        if let Some(content_root) = self.content_root {
            config.site.content_root = content_root;
        }
        if let Some(root) = self.root {
            config.site.root_path = root;
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(origin) = self.dev_server {
            config.dev_server.origin = Some(origin);
        }
        if self.proxy {
            config.dev_server.proxy_to_dev_server = true;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            let _ = logging::init(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.observability) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!("export-host v{} starting", env!("CARGO_PKG_VERSION"));

    match run_until_signal(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "export-host",
            "--root",
            "out",
            "--bind",
            "0.0.0.0:3001",
            "--dev-server",
            "http://localhost:3000",
            "--proxy",
        ]);
        let config = cli.into_config().unwrap();

        assert_eq!(config.site.root_path, "out");
        assert_eq!(config.listener.bind_address, "0.0.0.0:3001");
        assert!(config.dev_server.proxy_to_dev_server);
        assert_eq!(config.dev_server.origin.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_proxy_flag_requires_origin() {
        let cli = Cli::parse_from(["export-host", "--proxy"]);
        assert!(matches!(cli.into_config(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("host.toml");
        std::fs::write(
            &path,
            "[site]\nroot_path = \"out\"\n\n[dev_server]\norigin = \"http://localhost:3000\"\n",
        )
        .unwrap();

        let cli = Cli::parse_from(["export-host", "--config", path.to_str().unwrap(), "--proxy"]);
        let config = cli.into_config().unwrap();

        assert_eq!(config.site.root_path, "out");
        assert!(config.dev_server.proxy_to_dev_server);
    }
}
