//! User accessor

use super::{RepoResult, UserStore};
use crate::auth::PasswordService;
use crate::db::with_timeout;
use std::sync::Arc;
use std::time::Duration;
use tasklist_shared::User;

/// Account to be created; `password` is plaintext until `create` hashes it
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_id: String,
    pub username: String,
    pub password: String,
}

/// User repository for store operations
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn UserStore>,
    timeout: Duration,
}

impl UserRepository {
    pub fn new(store: Arc<dyn UserStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Hash the password with argon2 and persist the user.
    ///
    /// Always awaited: a duplicate username surfaces as `Duplicate`.
    pub async fn create(&self, new_user: NewUser) -> RepoResult<User> {
        let password_hash = PasswordService::hash_async(new_user.password).await?;

        let user = User {
            user_id: new_user.user_id,
            username: new_user.username,
            password_hash,
        };
        with_timeout(self.timeout, self.store.insert_user(&user)).await?;

        Ok(user)
    }

    /// Exact-match lookup; `None` when no such user exists
    pub async fn read_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        with_timeout(self.timeout, self.store.find_user_by_username(username)).await
    }
}
