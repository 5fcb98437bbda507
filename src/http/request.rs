//! Request identification.
//!
//! # Responsibilities
//! - Name the correlation header
//! - Read the request ID assigned by the request-id layers
//!
//! # Design Decisions
//! - IDs are generated by tower-http (`SetRequestIdLayer`) as early as possible
//! - Inbound IDs are kept, so a caller can correlate across hops

use axum::http::{HeaderName, Request};

/// Correlation header set on every request and echoed on every response.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// The request's ID, or `"unknown"` when none was assigned.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
