//! Error responses
//!
//! Every gateway failure is returned to the caller as
//! `{"status": "error", "message": ...}` with the status of its error kind.

use api_gateway_common::{ErrorBody, GatewayError};
use axum::Json;
use axum::response::{IntoResponse, Response};
use tracing::{info, warn};

/// Gateway error rendered as the JSON error envelope
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();

        if self.0.is_upstream() {
            warn!("Upstream failure ({}): {}", status.as_u16(), self.0);
        } else {
            info!("Request rejected ({}): {}", status.as_u16(), self.0);
        }

        (status, Json(ErrorBody::from(&self.0))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    async fn envelope(err: GatewayError) -> (StatusCode, serde_json::Value) {
        let response = ApiError::from(err).into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_unauthorized_envelope() {
        let (status, body) = envelope(GatewayError::Unauthorized).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            serde_json::json!({
                "status": "error",
                "message": "Authentication failed. Invalid user key."
            })
        );
    }

    #[tokio::test]
    async fn test_timeout_envelope() {
        let (status, body) = envelope(GatewayError::UpstreamTimeout).await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_connection_envelope_carries_detail() {
        let (status, body) =
            envelope(GatewayError::UpstreamConnection("dns failure".to_string())).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body["message"],
            "Gateway proxy error: Could not connect to external API. (dns failure)"
        );
    }

    #[tokio::test]
    async fn test_content_type_is_json() {
        let response = ApiError(GatewayError::EndpointNotFound("x".to_string())).into_response();
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
    }
}
