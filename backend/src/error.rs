//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to plain-text HTTP responses.

use crate::auth::TokenCheckError;
use crate::repositories::RepositoryError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tasklist_shared::{CredentialError, TokenError};
use thiserror::Error;
use tracing::{error, warn};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Storage error")]
    Storage(#[from] RepositoryError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Credentials(_)
            | ApiError::Token(_)
            | ApiError::Validation(_)
            | ApiError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TokenCheckError> for ApiError {
    fn from(err: TokenCheckError) -> Self {
        match err {
            TokenCheckError::Token(e) => ApiError::Token(e),
            TokenCheckError::Storage(e) => ApiError::Storage(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Credentials(err) => err.to_string(),
            ApiError::Token(err) => {
                warn!("Token rejected: {}", err);
                err.to_string()
            }
            ApiError::Validation(msg) | ApiError::MalformedRequest(msg) | ApiError::NotFound(msg) => {
                msg.clone()
            }
            ApiError::Storage(err) => {
                error!("Storage error: {:?}", err);
                "A storage error occurred".to_string()
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "An internal error occurred".to_string()
            }
        };

        (status, message).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
