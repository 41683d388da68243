//! Bearer token issuance and validation
//!
//! Tokens are 16 random bytes, hex-encoded, stored one per user with an
//! expiry. Issuing a token replaces whatever the user held before.

use crate::repositories::{RepoResult, RepositoryError, TokenRepository};
use argon2::password_hash::rand_core::{OsRng, RngCore};
use chrono::{DateTime, Duration, Utc};
use tasklist_shared::{AccessToken, TokenError};
use thiserror::Error;
use tracing::debug;

/// Random bytes per token
pub const TOKEN_BYTES: usize = 16;

/// Generate a random token value (hex-encoded)
pub fn generate_token_value() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Constant-time byte comparison
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |diff, (x, y)| diff | (x ^ y)) == 0
}

/// Why a presented token was not accepted
#[derive(Debug, Error)]
pub enum TokenCheckError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("token lookup failed")]
    Storage(#[from] RepositoryError),
}

/// Token service: issue on login/registration, validate per request
#[derive(Clone)]
pub struct TokenService {
    tokens: TokenRepository,
    ttl: Duration,
}

impl TokenService {
    pub fn new(tokens: TokenRepository, ttl_secs: i64) -> Self {
        Self {
            tokens,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Issue a fresh token for `user_id`, replacing any previous one
    pub async fn issue(&self, user_id: &str) -> RepoResult<AccessToken> {
        let token = AccessToken {
            token: generate_token_value(),
            user_id: user_id.to_string(),
            expiry: Utc::now() + self.ttl,
        };
        self.tokens.upsert(token.clone()).await?;
        debug!(user_id, expiry = %token.expiry, "Token issued");
        Ok(token)
    }

    /// Validate a presented token for `user_id` against the current time
    pub async fn validate(&self, presented: &str, user_id: &str) -> Result<(), TokenCheckError> {
        self.validate_at(presented, user_id, Utc::now()).await
    }

    /// Validate a presented token for `user_id` as of `now`
    pub async fn validate_at(
        &self,
        presented: &str,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), TokenCheckError> {
        let saved = self
            .tokens
            .read_by_user_id(user_id)
            .await?
            .ok_or_else(|| TokenError::Missing(user_id.to_string()))?;

        if !constant_time_eq(presented.as_bytes(), saved.token.as_bytes()) {
            return Err(TokenError::Mismatch(user_id.to_string()).into());
        }
        if saved.is_expired_at(now) {
            return Err(TokenError::Expired(user_id.to_string()).into());
        }
        Ok(())
    }

    #[inline]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn repository(&self) -> &TokenRepository {
        &self.tokens
    }
}
