//! Metrics collection and exposition.
//!
//! # Metrics
//! - `host_requests_total` (counter): requests by kind, method, status
//! - `host_request_duration_seconds` (histogram): latency by kind
//!
//! Kinds are `page` (a compiled route served a file), `asset` (the static file
//! fallback answered) and `proxy` (forwarded to the dev server).
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - The Prometheus endpoint is optional and off by default

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed request.
pub fn record_request(kind: &'static str, method: &str, status: u16, start_time: Instant) {
    metrics::counter!(
        "host_requests_total",
        "kind" => kind,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("host_request_duration_seconds", "kind" => kind)
        .record(start_time.elapsed().as_secs_f64());
}
