use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::AppState;

/// Liveness plus a database ping.
pub async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.db.health_check().await {
        (StatusCode::OK, "OK")
    } else {
        warn!("Health check: database unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, "DATABASE UNAVAILABLE")
    }
}
