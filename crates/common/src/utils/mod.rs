mod encoding;
mod headers;
mod id;

pub use encoding::encode_component;
pub use headers::{filter_relay_headers, is_relay_excluded, select_forward_headers};
pub use id::{REQUEST_ID_HEADER, generate_request_id, request_id};
