//! Header filtering between the client and the dev server.
//!
//! Request headers travel one-for-one; only entries the outbound request
//! cannot carry are dropped. Response headers lose the hop-by-hop set, which
//! describes the dev server's connection, not the client's.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Response headers never relayed to the client.
pub const HOP_BY_HOP: [&str; 5] = [
    "connection",
    "transfer-encoding",
    "keep-alive",
    "upgrade",
    "proxy-connection",
];

pub fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP
        .iter()
        .any(|hop| name.as_str().eq_ignore_ascii_case(hop))
}

/// Pseudo-headers and empty values are not forwarded.
pub fn is_forwardable(name: &str, value: &[u8]) -> bool {
    !name.starts_with(':') && !value.is_empty()
}

/// Build the outbound header map from inbound `(name, value)` pairs.
///
/// Repeated names keep every value, in order.
pub fn outbound_request_headers<'a, I>(inbound: I) -> HeaderMap
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut headers = HeaderMap::new();
    for (name, value) in inbound {
        if !is_forwardable(name, value) {
            continue;
        }
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_bytes(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            }
            _ => tracing::debug!(header = %name, "Dropping header the dev server request cannot carry"),
        }
    }
    headers
}

/// Copy `upstream` response headers, minus the hop-by-hop set.
pub fn relayed_response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if !is_hop_by_hop(name) {
            headers.append(name.clone(), value.clone());
        }
    }
    headers
}
