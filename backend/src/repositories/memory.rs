//! In-memory store for development and tests
//!
//! Data lives for the lifetime of the process.

use super::{RepoResult, RepositoryError, TaskStore, TokenStore, UserStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tasklist_shared::{AccessToken, TaskItem, TaskUpdate, User};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    /// Keyed by username
    users: RwLock<HashMap<String, User>>,
    /// Creation order
    tasks: RwLock<Vec<TaskItem>>,
    /// Keyed by user id
    tokens: RwLock<HashMap<String, AccessToken>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> RepoResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(RepositoryError::Duplicate(format!("username {}", user.username)));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn insert_task(&self, task: &TaskItem) -> RepoResult<()> {
        let mut tasks = self.tasks.write().await;
        if tasks.iter().any(|t| t.task_id == task.task_id) {
            return Err(RepositoryError::Duplicate(format!("task {}", task.task_id)));
        }
        tasks.push(task.clone());
        Ok(())
    }

    async fn tasks_for_user(&self, user_id: &str) -> RepoResult<Vec<TaskItem>> {
        Ok(self
            .tasks
            .read()
            .await
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_task(&self, user_id: &str, task_id: &str, patch: &TaskUpdate) -> RepoResult<u64> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks
            .iter_mut()
            .find(|t| t.user_id == user_id && t.task_id == task_id)
        else {
            return Ok(0);
        };

        if let Some(priority) = patch.priority {
            task.priority = Some(priority);
        }
        if let Some(text) = &patch.task {
            task.task = Some(text.clone());
        }
        Ok(1)
    }

    async fn delete_task(&self, user_id: &str, task_id: &str) -> RepoResult<u64> {
        let mut tasks = self.tasks.write().await;
        match tasks
            .iter()
            .position(|t| t.user_id == user_id && t.task_id == task_id)
        {
            Some(index) => {
                tasks.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn upsert_token(&self, token: &AccessToken) -> RepoResult<()> {
        self.tokens
            .write()
            .await
            .insert(token.user_id.clone(), token.clone());
        Ok(())
    }

    async fn token_for_user(&self, user_id: &str) -> RepoResult<Option<AccessToken>> {
        Ok(self.tokens.read().await.get(user_id).cloned())
    }
}
