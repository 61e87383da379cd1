//! Outbound HTTP transport
//!
//! The forwarder issues exactly one GET per gateway request. Redirects are
//! followed, response bodies are decompressed, and the whole exchange is
//! bounded by the configured timeout.

use api_gateway_common::constants::MAX_REDIRECTS;
use api_gateway_common::{GatewayError, ResolvedTarget, UpstreamResponse};
use async_trait::async_trait;
use reqwest::{Client, redirect};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Sends a resolved target upstream and returns the raw response
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    async fn get(&self, target: &ResolvedTarget) -> Result<UpstreamResponse, GatewayError>;
}

/// Transport backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamTransport for ReqwestTransport {
    async fn get(&self, target: &ResolvedTarget) -> Result<UpstreamResponse, GatewayError> {
        let start_time = Instant::now();

        debug!("Forwarding GET with headers {:?}", target.header_names());

        let response = self
            .client
            .get(&target.url)
            .headers(target.headers.clone())
            .send()
            .await
            .map_err(classify_error)?;

        let status_code = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(classify_error)?;

        debug!(
            "Upstream response: {} ({} bytes, {}ms)",
            status_code,
            body.len(),
            start_time.elapsed().as_millis()
        );

        Ok(UpstreamResponse {
            status_code,
            headers,
            body,
        })
    }
}

/// Map a transport failure onto the gateway taxonomy
///
/// The URL is stripped from the detail since it may carry caller credentials.
fn classify_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        warn!("Upstream request timed out");
        return GatewayError::UpstreamTimeout;
    }

    let detail = error_chain(e.without_url());
    warn!("Upstream request failed: {}", detail);
    GatewayError::UpstreamConnection(detail)
}

/// Render an error with its sources, outermost first
fn error_chain<E>(e: E) -> String
where
    E: std::error::Error + Send + Sync + 'static,
{
    format!("{:#}", anyhow::Error::new(e))
}
