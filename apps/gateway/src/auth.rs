//! Access key authentication
//!
//! Callers pass their key in the `key` query parameter. The key is checked for
//! exact membership in the configured set and never leaves the gateway.

use api_gateway_common::{CredentialSet, GatewayError};
use tracing::{debug, warn};

/// Check a caller-supplied key against the configured set
pub fn authenticate(keys: &CredentialSet, supplied_key: Option<&str>) -> Result<(), GatewayError> {
    let Some(key) = supplied_key else {
        warn!("Rejected request without access key");
        return Err(GatewayError::Unauthorized);
    };

    if !keys.contains(key) {
        warn!("Rejected request with unknown access key");
        return Err(GatewayError::Unauthorized);
    }

    debug!("Access key accepted");
    Ok(())
}
