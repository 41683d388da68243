//! User service for registration and login
//!
//! Usernames are lowercased before validation and lookup. Password hashing
//! and verification run on the blocking thread pool.

use crate::auth::{PasswordService, TokenService};
use crate::error::ApiError;
use crate::repositories::{NewUser, RepositoryError, UserRepository};
use tasklist_shared::validation::{normalize_username, validate_login, validate_registration};
use tasklist_shared::{new_identifier, AccessToken, CredentialError, LoginRequest, RegisterRequest};
use tracing::{info, warn};

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user and issue their first token
    pub async fn register(
        users: &UserRepository,
        tokens: &TokenService,
        req: RegisterRequest,
    ) -> Result<AccessToken, ApiError> {
        let req = RegisterRequest {
            username: normalize_username(&req.username),
            password: req.password,
        };
        validate_registration(&req)?;

        if users.read_by_username(&req.username).await?.is_some() {
            return Err(CredentialError::UsernameTaken.into());
        }

        let new_user = NewUser {
            user_id: new_identifier(),
            username: req.username,
            password: req.password,
        };
        // A concurrent registration can still win the race; the store's
        // uniqueness check reports it as a duplicate
        let user = users.create(new_user).await.map_err(|e| match e {
            RepositoryError::Duplicate(_) => ApiError::from(CredentialError::UsernameTaken),
            other => other.into(),
        })?;

        info!(user_id = %user.user_id, username = %user.username, "User registered");

        Ok(tokens.issue(&user.user_id).await?)
    }

    /// Check credentials and issue a fresh token
    pub async fn login(
        users: &UserRepository,
        tokens: &TokenService,
        req: LoginRequest,
    ) -> Result<AccessToken, ApiError> {
        let req = LoginRequest {
            username: normalize_username(&req.username),
            password: req.password,
        };
        validate_login(&req)?;

        let user = users
            .read_by_username(&req.username)
            .await?
            .ok_or(CredentialError::UnknownUser)?;

        let valid = PasswordService::verify_async(req.password, user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            warn!(username = %user.username, "Login rejected: incorrect password");
            return Err(CredentialError::IncorrectPassword.into());
        }

        info!(user_id = %user.user_id, "User logged in");

        Ok(tokens.issue(&user.user_id).await?)
    }
}
