use http::{HeaderMap, HeaderName};

use crate::constants::{FORWARDED_REQUEST_HEADERS, RELAY_EXCLUDED_HEADERS};

/// Copy the allow-listed inbound headers that should reach the upstream
///
/// Everything else, including `authorization` and `cookie`, stays behind.
pub fn select_forward_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for name in FORWARDED_REQUEST_HEADERS {
        let name = HeaderName::from_static(name);
        for value in inbound.get_all(&name) {
            headers.append(name.clone(), value.clone());
        }
    }

    headers
}

/// Whether an upstream response header must be dropped before relay
pub fn is_relay_excluded(name: &HeaderName) -> bool {
    // HeaderName is always lowercase
    RELAY_EXCLUDED_HEADERS.contains(&name.as_str())
}

/// Copy upstream response headers minus the framing deny-list
/// Supports multiple values per header name
pub fn filter_relay_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();

    for (name, value) in upstream.iter() {
        if !is_relay_excluded(name) {
            headers.append(name.clone(), value.clone());
        }
    }

    headers
}
