use http::HeaderMap;
use uuid::Uuid;

/// Header a caller may use to correlate its request with gateway logs
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Fresh request id for log spans
pub fn generate_request_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Request id for one inbound request
///
/// A caller-supplied `x-request-id` is reused only when it parses as a UUID,
/// so arbitrary header text never reaches the logs.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .map(|id| id.simple().to_string())
        .unwrap_or_else(generate_request_id)
}
