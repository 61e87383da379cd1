//! Gateway handler
//!
//! Runs one request through authentication, route lookup, template resolution,
//! forwarding and relay. The first failing stage ends the request with its
//! error envelope; nothing is retried and the upstream is called at most once.

use api_gateway_common::{
    GatewayError, RequestContext, ResolvedTarget, UpstreamResponse, request_id, resolve,
};
use axum::extract::{Path, RawQuery, State};
use axum::response::{IntoResponse, Response};
use http::HeaderMap;
use std::fmt;
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::AppState;
use crate::auth::authenticate;
use crate::error_handling::ApiError;
use crate::relay::relay;

/// Pipeline stages, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Authenticate,
    LookupRoute,
    ResolveTarget,
    Forward,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authenticate => "authenticate",
            Self::LookupRoute => "lookup_route",
            Self::ResolveTarget => "resolve_target",
            Self::Forward => "forward",
        };
        f.write_str(name)
    }
}

/// Handler for `GET /api/v1/{endpoint}`
pub async fn handle_gateway(
    State(state): State<AppState>,
    Path(endpoint): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let request_id = request_id(&headers);
    let span = info_span!("gateway", %request_id, %endpoint);

    async move {
        let ctx = RequestContext::from_parts(&endpoint, query.as_deref(), &headers);

        match process_request(&state, ctx).await {
            Ok(upstream) => relay(upstream),
            Err((stage, err)) => {
                debug!("Failed at stage {}", stage);
                ApiError(err).into_response()
            }
        }
    }
    .instrument(span)
    .await
}

/// Run the pipeline, reporting the stage that failed
pub async fn process_request(
    state: &AppState,
    ctx: RequestContext,
) -> Result<UpstreamResponse, (Stage, GatewayError)> {
    let start_time = Instant::now();
    debug!("Processing {:?}", ctx);

    authenticate(&state.keys, ctx.supplied_key.as_deref())
        .map_err(|e| (Stage::Authenticate, e))?;

    let route = state
        .routes
        .lookup(&ctx.endpoint)
        .map_err(|e| (Stage::LookupRoute, e))?;

    let url = resolve(route, &ctx.params).map_err(|e| (Stage::ResolveTarget, e))?;
    let target = ResolvedTarget::new(url, ctx.forward_headers);

    let upstream = state
        .transport
        .get(&target)
        .await
        .map_err(|e| (Stage::Forward, e))?;

    let elapsed = start_time.elapsed().as_millis();
    if upstream.is_success() {
        info!(
            "Relaying upstream status {} for '{}' ({}ms)",
            upstream.status_code,
            route.name(),
            elapsed
        );
    } else {
        warn!(
            "Relaying upstream error status {} for '{}' ({}ms)",
            upstream.status_code,
            route.name(),
            elapsed
        );
    }

    Ok(upstream)
}
