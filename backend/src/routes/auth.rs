//! Authentication routes
//!
//! Registration and login, both answering with a fresh `AccessToken`.

use super::json::AppJson;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use tasklist_shared::{AccessToken, LoginRequest, RegisterRequest};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
///
/// POST /api/v1/register
async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> ApiResult<Json<AccessToken>> {
    let token = UserService::register(state.users(), state.tokens(), req).await?;
    Ok(Json(token))
}

/// Login with username and password
///
/// POST /api/v1/login
async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> ApiResult<Json<AccessToken>> {
    let token = UserService::login(state.users(), state.tokens(), req).await?;
    Ok(Json(token))
}
