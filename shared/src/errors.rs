//! Error types for the task list domain

use thiserror::Error;

/// Bearer token validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("No token has been issued for user {0}")]
    Missing(String),

    #[error("Token does not match saved token for user {0}")]
    Mismatch(String),

    #[error("Token expired for user {0}")]
    Expired(String),
}

/// Registration and login failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("{0}")]
    Validation(String),

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Username does not exist")]
    UnknownUser,

    #[error("Incorrect password")]
    IncorrectPassword,
}
