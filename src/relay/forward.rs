//! Outbound request construction.
//!
//! # Responsibilities
//! - Strip the relay mount prefix from the raw inbound path
//! - Build the target URL from that path and the original query string
//! - Decide which inbound headers cross the hop
//! - Decide whether the inbound body is forwarded

use axum::http::{header, HeaderMap, HeaderValue, Method};

use crate::resolve::RELAY_PREFIX;

/// Headers meaningful only on the inbound hop. `host` must not leak to the
/// upstream (virtual-host mismatch); `content-length` and `connection` are
/// re-derived per hop.
const HOP_HEADERS: [header::HeaderName; 3] =
    [header::HOST, header::CONTENT_LENGTH, header::CONNECTION];

/// Strip the relay mount prefix from an inbound URI path, yielding the
/// capture to join onto the upstream base.
///
/// Works on the raw path so percent-encoded segments cross the relay
/// untouched; decoding and re-parsing would corrupt them.
pub fn raw_capture(path: &str) -> &str {
    let rest = path.strip_prefix(RELAY_PREFIX).unwrap_or(path);
    rest.strip_prefix('/').unwrap_or(rest)
}

/// Build the upstream URL: base + `/`-joined path + original query verbatim.
///
/// `path` is the capture after the mount prefix, without a leading slash;
/// an empty capture targets the upstream root.
pub fn target_url(base_url: &str, path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) => format!("{base_url}/{path}?{q}"),
        None => format!("{base_url}/{path}"),
    }
}

/// Copy inbound headers for the upstream hop.
///
/// `accept-encoding` is forced to `identity` so the upstream skips
/// compression; the relay passes bodies through without managing
/// decompression on the caller's behalf.
pub fn forward_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len() + 1);
    for (name, value) in inbound {
        if HOP_HEADERS.contains(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("identity"));
    headers
}

/// GET and HEAD requests never carry a forwarded body.
pub fn method_takes_body(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD)
}
