use http::StatusCode;
use thiserror::Error;

/// Failures of a single gateway request, each mapped to one HTTP status
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Authentication failed. Invalid user key.")]
    Unauthorized,

    #[error("API endpoint '{0}' not found.")]
    EndpointNotFound(String),

    #[error("Missing required parameters for '{endpoint}': {}", .missing.join(", "))]
    MissingParameters {
        endpoint: String,
        missing: Vec<String>,
    },

    #[error("Missing '{param}' parameter for {endpoint} endpoint.")]
    EmptyPassThrough { endpoint: String, param: String },

    #[error("Gateway proxy error: External API request timed out.")]
    UpstreamTimeout,

    #[error("Gateway proxy error: Could not connect to external API. ({0})")]
    UpstreamConnection(String),
}

impl GatewayError {
    /// HTTP status reported to the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::EndpointNotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingParameters { .. } | Self::EmptyPassThrough { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::UpstreamConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Whether the failure happened after the request left the gateway
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamTimeout | Self::UpstreamConnection(_))
    }
}

/// Type alias for Results using GatewayError
pub type Result<T> = std::result::Result<T, GatewayError>;
