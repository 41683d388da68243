//! Data access layer
//!
//! Accessors (`UserRepository`, `TaskRepository`, `TokenRepository`) translate
//! domain operations into calls on a store backend and apply the per-operation
//! timeout. Backends implement the store traits below; PostgreSQL and an
//! in-memory store are provided.

pub mod background;
pub mod memory;
pub mod postgres;
pub mod task;
pub mod token;
pub mod user;

use async_trait::async_trait;
use std::time::Duration;
use tasklist_shared::{AccessToken, TaskItem, TaskUpdate, User};
use thiserror::Error;

pub use background::BackgroundWrites;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use task::TaskRepository;
pub use token::TokenRepository;
pub use user::{NewUser, UserRepository};

/// Storage failures, scoped to the operation that raised them
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Duplicate key: {0}")]
    Duplicate(String),

    #[error("Storage operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Persistence for user accounts, unique by username
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; fails with `Duplicate` when the username is taken
    async fn insert_user(&self, user: &User) -> RepoResult<()>;

    async fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>>;
}

/// Persistence for task items
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, task: &TaskItem) -> RepoResult<()>;

    /// All tasks owned by `user_id`, in creation order
    async fn tasks_for_user(&self, user_id: &str) -> RepoResult<Vec<TaskItem>>;

    /// Apply the present fields of `patch`; returns the matched count
    async fn update_task(&self, user_id: &str, task_id: &str, patch: &TaskUpdate) -> RepoResult<u64>;

    /// Returns the removed count
    async fn delete_task(&self, user_id: &str, task_id: &str) -> RepoResult<u64>;
}

/// Persistence for bearer tokens, one record per user
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Insert or replace the token keyed by its user id
    async fn upsert_token(&self, token: &AccessToken) -> RepoResult<()>;

    async fn token_for_user(&self, user_id: &str) -> RepoResult<Option<AccessToken>>;
}
