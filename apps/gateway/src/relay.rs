use api_gateway_common::{UpstreamResponse, filter_relay_headers};
use axum::body::Body;
use axum::response::Response;
use http::StatusCode;
use tracing::warn;

/// Convert an upstream response into the response sent to the caller
///
/// Status and body are copied verbatim; headers lose the framing deny-list.
pub fn relay(upstream: UpstreamResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status_code).unwrap_or_else(|_| {
        warn!("Upstream returned invalid status {}", upstream.status_code);
        StatusCode::BAD_GATEWAY
    });

    let mut response = Response::new(Body::from(upstream.body));
    *response.status_mut() = status;
    *response.headers_mut() = filter_relay_headers(&upstream.headers);

    response
}
