use bytes::Bytes;
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Response received from the external service
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Relayed to the caller as-is, including 4xx and 5xx
    pub status_code: u16,

    /// Response headers as received, before relay filtering
    pub headers: HeaderMap,

    /// Response body, opaque bytes
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Create a new upstream response with no headers or body
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// JSON envelope returned for every gateway failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `"error"`
    pub status: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}

impl From<&GatewayError> for ErrorBody {
    fn from(err: &GatewayError) -> Self {
        Self::new(err.to_string())
    }
}
