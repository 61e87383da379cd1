//! Common types and routing logic for the API gateway
//!
//! This crate holds the route table, parameter collection, template resolution
//! and the header rules shared by the gateway server and its tests.

pub mod constants;
pub mod error;
pub mod models;
pub mod protocol;
pub mod routing;
pub mod utils;
pub mod validation;

// Re-export commonly used types for convenience
pub use error::{GatewayError, Result};
pub use models::{CredentialSet, Route, RouteDefinition, RouteKind, RouteTable};
pub use protocol::{ErrorBody, ResolvedTarget, UpstreamResponse};
pub use routing::{RequestContext, collect, resolve};
pub use utils::{
    encode_component, filter_relay_headers, generate_request_id, request_id, select_forward_headers,
};
pub use validation::ConfigError;
