/// Path prefix under which gateway endpoints are mounted
pub const API_PREFIX: &str = "/api/v1";

/// Query parameter carrying the caller's access key
pub const AUTH_QUERY_PARAM: &str = "key";

/// Query parameter selecting the endpoint (stripped even though the path carries it)
pub const ENDPOINT_QUERY_PARAM: &str = "api_name";

/// Timeout for the whole outbound call: connect, headers and body (15 seconds)
pub const UPSTREAM_TIMEOUT_SECS: u64 = 15;

/// Maximum number of redirects followed on the outbound call
pub const MAX_REDIRECTS: usize = 10;

/// Inbound request headers copied onto the outbound request when present
pub const FORWARDED_REQUEST_HEADERS: [&str; 2] = ["user-agent", "accept-language"];

/// Upstream response headers never relayed back, they describe the framing of
/// the upstream message
pub const RELAY_EXCLUDED_HEADERS: [&str; 4] = [
    "content-encoding",
    "content-length",
    "transfer-encoding",
    "connection",
];

/// Name of the built-in pass-through route
pub const PASS_THROUGH_ROUTE: &str = "ham_harama";

/// Parameter carrying the complete target URL for the pass-through route
pub const PASS_THROUGH_PARAM: &str = "full_url";

/// Maximum length of an endpoint name
pub const MAX_ROUTE_NAME_LENGTH: usize = 64;
