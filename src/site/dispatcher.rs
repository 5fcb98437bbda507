//! Serving matched pages and assets.
//!
//! # Responsibilities
//! - Rewrite a matched request to the page's physical file
//! - Hand the request to the static file server (`ServeDir`)
//! - Serve unmatched requests as plain assets from the same root
//!
//! # Design Decisions
//! - Byte serving (content type, ETag, ranges) is entirely `ServeDir`'s job
//! - Physical paths are percent-encoded per segment; `ServeDir` decodes them

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{uri::PathAndQuery, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::http::request::request_id;
use crate::observability::metrics;
use crate::routing::{PageRouter, RouteEntry};

/// Characters left as-is in a path segment; everything else is encoded.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Hands page and asset requests to the static file server.
#[derive(Debug, Clone)]
pub struct StaticRouteDispatcher {
    files: ServeDir,
}

impl StaticRouteDispatcher {
    pub fn new(root: &Path) -> Self {
        Self {
            files: ServeDir::new(root),
        }
    }

    /// Serve `entry`'s file in response to `request`.
    pub async fn dispatch(&self, entry: &RouteEntry, mut request: Request<Body>) -> Response {
        match rewrite_uri(request.uri(), &entry.physical_path) {
            Ok(uri) => *request.uri_mut() = uri,
            Err(e) => {
                tracing::error!(file = %entry.physical_path, error = %e, "Failed to rewrite request to page file");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }

        // The file server produces the response, not the router.
        request.extensions_mut().remove::<MatchedPath>();

        self.serve(request).await
    }

    /// Serve `request` by its own path.
    pub async fn serve(&self, request: Request<Body>) -> Response {
        match self.files.clone().oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        }
    }
}

/// Replace the path of `uri` with `physical_path`, keeping the query.
pub fn rewrite_uri(uri: &Uri, physical_path: &str) -> Result<Uri, axum::http::Error> {
    let mut path = physical_path
        .split('/')
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/");

    if let Some(query) = uri.query() {
        path.push('?');
        path.push_str(query);
    }

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path)?);
    Ok(Uri::from_parts(parts)?)
}

/// Shared state of the static site handler.
#[derive(Debug, Clone)]
pub struct SiteState {
    pub pages: Arc<PageRouter>,
    pub dispatcher: StaticRouteDispatcher,
}

/// Fallback handler in static mode: pages first, then assets.
pub async fn serve_site(State(state): State<SiteState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let (kind, response) = match state.pages.match_path(&path) {
        Some(page) => {
            tracing::debug!(
                request_id = %request_id,
                path = %path,
                route = %page.entry.display_name,
                "Serving page"
            );
            ("page", state.dispatcher.dispatch(page.entry, request).await)
        }
        None => {
            tracing::trace!(request_id = %request_id, path = %path, "Serving asset");
            ("asset", state.dispatcher.serve(request).await)
        }
    };

    metrics::record_request(kind, method.as_str(), response.status().as_u16(), start_time);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_keeps_query() {
        let uri: Uri = "/post/42?draft=1".parse().unwrap();
        let rewritten = rewrite_uri(&uri, "/post/[pid].html").unwrap();
        assert_eq!(rewritten.path(), "/post/%5Bpid%5D.html");
        assert_eq!(rewritten.query(), Some("draft=1"));
    }

    #[test]
    fn test_rewrite_encodes_non_ascii() {
        let uri: Uri = "/nested%20%E4%B8%AD%E6%96%87/123".parse().unwrap();
        let rewritten = rewrite_uri(&uri, "/nested 中文/123.html").unwrap();
        assert_eq!(rewritten.path(), "/nested%20%E4%B8%AD%E6%96%87/123.html");
        assert_eq!(rewritten.query(), None);
    }

    #[test]
    fn test_rewrite_absolute_form() {
        let uri: Uri = "http://example.com/about".parse().unwrap();
        let rewritten = rewrite_uri(&uri, "/about.html").unwrap();
        assert_eq!(rewritten.to_string(), "http://example.com/about.html");
    }
}
