use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::{authenticate, issue_token};
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::AppState;
use mtc_core::UserRole;

pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub role: UserRole,
    pub full_name: String,
}

async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = authenticate(&state.db, &req.username, &req.password).await?;

    info!(username = %user.username, role = user.role.as_str(), "User logged in");

    Ok(Json(LoginResponse {
        token: issue_token(),
        role: user.role,
        full_name: user.display_name().to_string(),
    }))
}
