//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Decide the serving mode (static site or dev server proxy)
//! - Build the route table before the listener is bound
//! - Wire up middleware (tracing, request ID, timeout)
//! - Serve on a listener until shutdown
//!
//! # Design Decisions
//! - Both modes mount their handler as the router fallback, so every path
//!   reaches it and precedence stays in `PageRouter`
//! - In proxy mode the site is never walked
//! - The request timeout applies to static mode only; proxied requests are
//!   bounded by the dev server activity timeout instead
//! - In proxy mode the forwarder logs dev server failures itself, so the
//!   trace layer reports failed requests at debug only

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnFailure, TraceLayer},
};
use tracing::Level;

use crate::config::{ConfigError, HostConfig};
use crate::error::HostResult;
use crate::proxy::{forward_to_dev_server, DevServerForwarder, DevServerOrigin, ProxyOptions};
use crate::routing::{summarize, PageRouter, RouteTable};
use crate::site::{serve_site, LocalDirectory, RootOptions, SiteState, StaticRouteDispatcher};

/// What the server does with requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServeMode {
    /// Pages and assets from the exported site directory.
    StaticSite { pages: usize },
    /// Everything forwarded to the dev server.
    DevServerProxy { origin: String },
}

impl ServeMode {
    /// Level at which the trace layer reports a failed request.
    pub fn trace_failure_level(&self) -> Level {
        match self {
            ServeMode::StaticSite { .. } => Level::ERROR,
            ServeMode::DevServerProxy { .. } => Level::DEBUG,
        }
    }
}

/// HTTP server for the exported site.
pub struct HostServer {
    router: Router,
    mode: ServeMode,
}

impl HostServer {
    /// Build the server for `config`.
    ///
    /// In static mode this walks the site and registers every page; any
    /// conflict fails here, before a listener exists.
    pub fn new(config: &HostConfig) -> HostResult<Self> {
        let options = ProxyOptions::from_config(&config.dev_server)
            .map_err(|e| ConfigError::Validation(vec![e]))?;

        let (router, mode) = match options.proxy_origin() {
            Some(origin) => Self::build_proxy(origin.clone(), options.activity_timeout()),
            None => Self::build_site(config)?,
        };

        tracing::info!(mode = ?mode, "Serving mode selected");

        let on_failure = DefaultOnFailure::new().level(mode.trace_failure_level());
        let router = router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().on_failure(on_failure))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

        Ok(Self { router, mode })
    }

    fn build_proxy(origin: DevServerOrigin, activity_timeout: Duration) -> (Router, ServeMode) {
        let mode = ServeMode::DevServerProxy {
            origin: origin.to_string(),
        };
        let forwarder = DevServerForwarder::new(origin, activity_timeout);

        let router = Router::new()
            .fallback(forward_to_dev_server)
            .with_state(forwarder);
        (router, mode)
    }

    #[allow(deprecated)]
    fn build_site(config: &HostConfig) -> HostResult<(Router, ServeMode)> {
        let root = RootOptions::new(&config.site.root_path)
            .map_err(|e| ConfigError::Validation(vec![e]))?
            .resolve(Path::new(&config.site.content_root));

        let provider = LocalDirectory::open(&root)?;
        let table = RouteTable::build(&provider)?;
        let pages = PageRouter::from_table(&table)?;

        tracing::info!(
            root = %root.display(),
            pages = pages.len(),
            summary = ?summarize(&pages),
            "Static site ready"
        );

        let mode = ServeMode::StaticSite { pages: pages.len() };
        let state = SiteState {
            pages: Arc::new(pages),
            dispatcher: StaticRouteDispatcher::new(provider.root()),
        };

        let router = Router::new()
            .fallback(serve_site)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));
        Ok((router, mode))
    }

    pub fn mode(&self) -> &ServeMode {
        &self.mode
    }

    /// The fully layered router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_failures_traced_below_error() {
        let proxy = ServeMode::DevServerProxy {
            origin: "http://127.0.0.1:3000".into(),
        };
        assert_eq!(proxy.trace_failure_level(), Level::DEBUG);
        assert_eq!(ServeMode::StaticSite { pages: 0 }.trace_failure_level(), Level::ERROR);
    }
}
