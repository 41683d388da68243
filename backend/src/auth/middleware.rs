//! Authentication extractor
//!
//! Task routes carry the owner's id in the path. `TaskOwner` checks that id,
//! parses the `Authorization: Bearer <token>` header and validates the token
//! against the one stored for that user.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts, Path},
    http::{header::AUTHORIZATION, request::Parts},
};
use std::collections::HashMap;
use tasklist_shared::validation::is_valid_user_id;

const BEARER_SCHEME: &str = "bearer";

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively and must be followed by exactly
/// one space and a single non-empty token without whitespace.
pub fn parse_bearer(header: &str) -> Result<&str, ApiError> {
    let malformed = || ApiError::MalformedRequest("Bearer token not in proper format".to_string());

    let (scheme, token) = header.split_once(' ').ok_or_else(malformed)?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(malformed());
    }
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(malformed());
    }
    Ok(token)
}

/// Owner of the task collection addressed by the request path, authenticated
#[derive(Debug, Clone)]
pub struct TaskOwner {
    pub user_id: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for TaskOwner
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::NotFound(e.body_text()))?;

        let user_id = params
            .get("user_id")
            .filter(|id| is_valid_user_id(id))
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Unknown user path".to_string()))?;

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::MalformedRequest("Missing authorization header".to_string()))?
            .to_str()
            .map_err(|_| ApiError::MalformedRequest("Authorization header is not valid text".to_string()))?;

        let token = parse_bearer(header)?;
        app_state.tokens().validate(token, &user_id).await?;

        Ok(TaskOwner { user_id })
    }
}
