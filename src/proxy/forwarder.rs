//! Forwarding to the dev server.
//!
//! # Responsibilities
//! - Rebuild each inbound request against the dev server origin
//! - Relay status, filtered headers and a streamed body back
//! - Explain, in the response, when the dev server cannot be reached
//!
//! # Design Decisions
//! - No retries: a dev server that fails is reported, not hidden
//! - The response head is awaited under the activity timeout; the body is
//!   guarded by an idle timeout of the same length
//! - Cancellation is drop-based: a client disconnect drops this future and
//!   the relayed body, which releases the upstream connection

use std::error::Error as StdError;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use futures_util::TryStreamExt;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tower_http::timeout::TimeoutBody;

use crate::http::request::request_id;
use crate::observability::metrics;
use crate::proxy::headers;
use crate::proxy::options::DevServerOrigin;

/// Failure to obtain a response head from the dev server.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("invalid upstream request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("{0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),
}

impl ForwardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ForwardError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ForwardError::Request(_) | ForwardError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// The inbound request body failed, i.e. the client went away mid-upload.
    pub fn is_client_abort(&self) -> bool {
        let mut source = self.source();
        while let Some(err) = source {
            if err.is::<axum::Error>() {
                return true;
            }
            source = err.source();
        }
        false
    }
}

/// Reverse proxy to a single dev server origin.
#[derive(Debug, Clone)]
pub struct DevServerForwarder {
    client: Client<HttpConnector, Body>,
    origin: DevServerOrigin,
    activity_timeout: Duration,
}

impl DevServerForwarder {
    pub fn new(origin: DevServerOrigin, activity_timeout: Duration) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_nodelay(true);
        connector.set_connect_timeout(Some(activity_timeout));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            origin,
            activity_timeout,
        }
    }

    pub fn origin(&self) -> &DevServerOrigin {
        &self.origin
    }

    /// Send `request` to the dev server and relay its response.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response, ForwardError> {
        let (parts, body) = request.into_parts();

        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let uri = Uri::builder()
            .scheme(self.origin.scheme())
            .authority(self.origin.authority())
            .path_and_query(path_and_query)
            .build()?;

        let mut outbound = Request::builder().method(parts.method).uri(uri).body(body)?;
        *outbound.headers_mut() = headers::outbound_request_headers(
            parts
                .headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_bytes())),
        );

        let upstream = tokio::time::timeout(self.activity_timeout, self.client.request(outbound))
            .await
            .map_err(|_| ForwardError::Timeout(self.activity_timeout))??;

        let (upstream_parts, upstream_body) = upstream.into_parts();

        let mut response = Response::new(self.relay_body(upstream_body));
        *response.status_mut() = upstream_parts.status;
        *response.headers_mut() = headers::relayed_response_headers(&upstream_parts.headers);
        Ok(response)
    }

    /// Stream the dev server body through, bounded by the idle timeout.
    ///
    /// A failure after the head went out can only be logged; the client sees
    /// a truncated body.
    fn relay_body(&self, body: Incoming) -> Body {
        let origin = self.origin.to_string();
        let stream = Body::new(TimeoutBody::new(self.activity_timeout, body))
            .into_data_stream()
            .inspect_err(move |e| {
                tracing::warn!(origin = %origin, error = %e, "Dev server response ended early");
            });
        Body::from_stream(stream)
    }

    /// Diagnostic sent when no response head arrived.
    pub fn unreachable_response(&self, error: &ForwardError) -> Response {
        let message = format!(
            "Unable to reach the dev server. Please ensure it is running at {origin}.\n\
             If you did not intend to proxy requests to a dev server, set \
             dev_server.proxy_to_dev_server to false (or drop --proxy).\n\
             Error: {error}\n",
            origin = self.origin,
        );

        (
            error.status_code(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}

/// Fallback handler in proxy mode: every request goes to the dev server.
pub async fn forward_to_dev_server(
    State(forwarder): State<DevServerForwarder>,
    request: Request<Body>,
) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        origin = %forwarder.origin(),
        "Proxying request to dev server"
    );

    let response = match forwarder.forward(request).await {
        Ok(response) => response,
        Err(e) if e.is_client_abort() => {
            tracing::debug!(request_id = %request_id, error = %e, "Client aborted request body");
            forwarder.unreachable_response(&e)
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                origin = %forwarder.origin(),
                error = %e,
                "Dev server request failed"
            );
            forwarder.unreachable_response(&e)
        }
    };

    metrics::record_request("proxy", method.as_str(), response.status().as_u16(), start_time);
    response
}
