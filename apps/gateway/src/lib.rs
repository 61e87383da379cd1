//! Key-authenticated HTTP gateway
//!
//! Maps named endpoints under `/api/v1/{endpoint}` to external URL templates,
//! resolves them with the caller's query parameters, forwards a GET upstream and
//! relays the answer. Route table and keys are loaded once and shared read-only.

use api_gateway_common::constants::API_PREFIX;
use api_gateway_common::{CredentialSet, RouteTable};
use axum::Router;
use axum::routing::get;
use std::path::PathBuf;
use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod error_handling;
pub mod handlers;
pub mod relay;
pub mod transport;

use transport::UpstreamTransport;

/// Read-only state shared by every request
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub keys: Arc<CredentialSet>,
    pub transport: Arc<dyn UpstreamTransport>,
    pub index_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(
        routes: RouteTable,
        keys: CredentialSet,
        transport: Arc<dyn UpstreamTransport>,
        index_path: PathBuf,
    ) -> Self {
        Self {
            routes: Arc::new(routes),
            keys: Arc::new(keys),
            transport,
            index_path: Arc::new(index_path),
        }
    }
}

/// Build the HTTP router: landing page plus the gateway endpoint
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_index))
        .route(
            &format!("{}/{{endpoint}}", API_PREFIX),
            get(handlers::handle_gateway),
        )
        .with_state(state)
}
