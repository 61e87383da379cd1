use axum::extract::State;
use axum::response::Html;
use tracing::debug;

use crate::AppState;

/// Served when the landing page file cannot be read
pub const FALLBACK_INDEX: &str =
    "<h1>API Gateway Running</h1><p>Use /api/v1/ to access the gateway.</p>";

/// Handler for `GET /`
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    match tokio::fs::read_to_string(state.index_path.as_ref()).await {
        Ok(page) => Html(page),
        Err(e) => {
            debug!(
                "Landing page {} unavailable ({}), serving fallback",
                state.index_path.display(),
                e
            );
            Html(FALLBACK_INDEX.to_string())
        }
    }
}
