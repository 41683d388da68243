//! Input validation functions
//!
//! Credential rules are declared on the request types with the `validator`
//! derive; this module holds the helpers around them plus identifier checks
//! for path segments.

use crate::errors::CredentialError;
use crate::types::{LoginRequest, RegisterRequest};
use validator::{Validate, ValidationErrors};

/// Usernames are stored and looked up lowercased
pub fn normalize_username(username: &str) -> String {
    username.to_lowercase()
}

/// Validate a registration request; expects an already-normalized username.
///
/// The username rule is reported before the password rule.
pub fn validate_registration(req: &RegisterRequest) -> Result<(), CredentialError> {
    req.validate()
        .map_err(|errors| CredentialError::Validation(first_message(&errors, &["username", "password"])))
}

/// Login only requires both fields to be present
pub fn validate_login(req: &LoginRequest) -> Result<(), CredentialError> {
    if req.username.is_empty() {
        return Err(CredentialError::Validation(
            "Missing username in login request".to_string(),
        ));
    }
    if req.password.is_empty() {
        return Err(CredentialError::Validation(
            "Missing password in login request".to_string(),
        ));
    }
    Ok(())
}

/// User identifiers in paths are ASCII alphanumeric
pub fn is_valid_user_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Task identifiers in paths are ASCII alphanumeric or '-'
pub fn is_valid_task_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn first_message(errors: &ValidationErrors, fields: &[&str]) -> String {
    let field_errors = errors.field_errors();
    fields
        .iter()
        .filter_map(|field| field_errors.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string())
}
