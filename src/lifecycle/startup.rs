//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Build the server (route table included) before binding
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The listener starts last, so traffic only arrives when routes exist

use tokio::net::TcpListener;

use crate::config::HostConfig;
use crate::error::HostResult;
use crate::http::HostServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals;
use crate::observability::metrics;

/// Start serving `config` until `shutdown` fires.
pub async fn start(config: HostConfig, shutdown: &Shutdown) -> HostResult<()> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        content_root = %config.site.content_root,
        root_path = %config.site.root_path,
        proxy_to_dev_server = config.dev_server.proxy_to_dev_server,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HostServer::new(&config)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}

/// Start serving `config` until the process is signalled to stop.
pub async fn run_until_signal(config: HostConfig) -> HostResult<()> {
    let shutdown = Shutdown::new();
    shutdown.trigger_on(signals::termination());
    start(config, &shutdown).await
}
