//! Task accessor
//!
//! Generates task identifiers, attaches the owner and groups listings by
//! priority.

use super::{BackgroundWrites, RepoResult, TaskStore};
use crate::config::WriteMode;
use crate::db::with_timeout;
use std::sync::Arc;
use std::time::Duration;
use tasklist_shared::{
    bucket_by_priority, new_identifier, CreateResponse, DeleteResponse, NewTask, TaskBuckets,
    TaskItem, TaskUpdate, UpdateResponse,
};

/// Task repository for store operations
#[derive(Clone)]
pub struct TaskRepository {
    store: Arc<dyn TaskStore>,
    timeout: Duration,
    mode: WriteMode,
    writes: BackgroundWrites,
}

impl TaskRepository {
    pub fn new(
        store: Arc<dyn TaskStore>,
        timeout: Duration,
        mode: WriteMode,
        writes: BackgroundWrites,
    ) -> Self {
        Self {
            store,
            timeout,
            mode,
            writes,
        }
    }

    /// Persist a new task owned by `user_id`.
    ///
    /// In background mode the acknowledgment is returned before the insert
    /// completes.
    pub async fn create(&self, user_id: &str, new_task: NewTask) -> RepoResult<CreateResponse> {
        let task = TaskItem {
            priority: new_task.priority,
            task: new_task.task,
            user_id: user_id.to_string(),
            task_id: new_identifier(),
        };
        let task_id = task.task_id.clone();

        let store = Arc::clone(&self.store);
        let limit = self.timeout;
        self.writes
            .dispatch(self.mode, "task.create", async move {
                with_timeout(limit, store.insert_task(&task)).await
            })
            .await?;

        Ok(CreateResponse {
            success: true,
            task_id,
        })
    }

    /// All tasks of `user_id`, bucketed by priority
    pub async fn read_by_user_id(&self, user_id: &str) -> RepoResult<TaskBuckets> {
        let tasks = with_timeout(self.timeout, self.store.tasks_for_user(user_id)).await?;
        Ok(bucket_by_priority(tasks))
    }

    /// Apply `patch` to the task matching owner and id
    pub async fn update(
        &self,
        user_id: &str,
        task_id: &str,
        patch: &TaskUpdate,
    ) -> RepoResult<UpdateResponse> {
        let updated =
            with_timeout(self.timeout, self.store.update_task(user_id, task_id, patch)).await?;
        Ok(UpdateResponse {
            success: true,
            updated,
        })
    }

    /// Remove the task matching owner and id; zero when nothing matched
    pub async fn delete(&self, user_id: &str, task_id: &str) -> RepoResult<DeleteResponse> {
        let deleted = with_timeout(self.timeout, self.store.delete_task(user_id, task_id)).await?;
        Ok(DeleteResponse {
            success: true,
            deleted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryStore;

    fn repository(mode: WriteMode) -> (TaskRepository, BackgroundWrites) {
        let writes = BackgroundWrites::new();
        let repo = TaskRepository::new(
            Arc::new(MemoryStore::new()),
            Duration::from_secs(10),
            mode,
            writes.clone(),
        );
        (repo, writes)
    }

    fn new_task(priority: Option<i32>, text: &str) -> NewTask {
        NewTask {
            priority,
            task: Some(text.to_string()),
        }
    }

    #[tokio::test]
    async fn test_no_tasks_gives_empty_mapping() {
        let (repo, _) = repository(WriteMode::Sync);
        assert!(repo.read_by_user_id("owner").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_attaches_owner_and_id() {
        let (repo, _) = repository(WriteMode::Sync);
        let ack = repo.create("owner", new_task(Some(2), "buy milk")).await.unwrap();
        assert!(ack.success);
        assert_eq!(ack.task_id.len(), 32);

        let buckets = repo.read_by_user_id("owner").await.unwrap();
        let task = &buckets[&2][0];
        assert_eq!(task.task_id, ack.task_id);
        assert_eq!(task.user_id, "owner");
        assert_eq!(task.task.as_deref(), Some("buy milk"));
    }

    #[tokio::test]
    async fn test_buckets_preserve_creation_order() {
        let (repo, _) = repository(WriteMode::Sync);
        let t1 = repo.create("owner", new_task(Some(0), "t1")).await.unwrap();
        let t2 = repo.create("owner", new_task(Some(1), "t2")).await.unwrap();
        let t3 = repo.create("owner", new_task(Some(1), "t3")).await.unwrap();

        let buckets = repo.read_by_user_id("owner").await.unwrap();
        assert_eq!(buckets.len(), 2);
        let zero: Vec<_> = buckets[&0].iter().map(|t| t.task_id.clone()).collect();
        let one: Vec<_> = buckets[&1].iter().map(|t| t.task_id.clone()).collect();
        assert_eq!(zero, vec![t1.task_id]);
        assert_eq!(one, vec![t2.task_id, t3.task_id]);
    }

    #[tokio::test]
    async fn test_missing_priority_is_bucket_zero() {
        let (repo, _) = repository(WriteMode::Sync);
        repo.create("owner", new_task(None, "someday")).await.unwrap();
        let buckets = repo.read_by_user_id("owner").await.unwrap();
        assert_eq!(buckets[&0].len(), 1);
        assert_eq!(buckets[&0][0].priority, None);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_returns_zero() {
        let (repo, _) = repository(WriteMode::Sync);
        let ack = repo.delete("owner", "does-not-exist").await.unwrap();
        assert!(ack.success);
        assert_eq!(ack.deleted, 0);
    }

    #[tokio::test]
    async fn test_delete_removes_task() {
        let (repo, _) = repository(WriteMode::Sync);
        let ack = repo.create("owner", new_task(Some(1), "t1")).await.unwrap();
        assert_eq!(repo.delete("owner", &ack.task_id).await.unwrap().deleted, 1);
        assert!(repo.read_by_user_id("owner").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_priority_update_moves_task_exactly_once() {
        let (repo, _) = repository(WriteMode::Sync);
        let ack = repo.create("owner", new_task(Some(1), "t1")).await.unwrap();

        let patch = TaskUpdate {
            priority: Some(3),
            task: None,
        };
        let updated = repo.update("owner", &ack.task_id, &patch).await.unwrap();
        assert_eq!(updated.updated, 1);

        let buckets = repo.read_by_user_id("owner").await.unwrap();
        assert!(!buckets.contains_key(&1));
        assert_eq!(buckets[&3].len(), 1);
        assert_eq!(buckets[&3][0].task.as_deref(), Some("t1"));
        let total: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_update_other_users_task_matches_nothing() {
        let (repo, _) = repository(WriteMode::Sync);
        let ack = repo.create("owner", new_task(Some(1), "t1")).await.unwrap();
        let patch = TaskUpdate {
            priority: None,
            task: Some("hijacked".to_string()),
        };
        assert_eq!(repo.update("intruder", &ack.task_id, &patch).await.unwrap().updated, 0);
    }

    #[tokio::test]
    async fn test_background_create_visible_after_drain() {
        let (repo, writes) = repository(WriteMode::Background);
        let ack = repo.create("owner", new_task(Some(1), "later")).await.unwrap();

        writes.drain().await;

        let buckets = repo.read_by_user_id("owner").await.unwrap();
        assert_eq!(buckets[&1][0].task_id, ack.task_id);
    }
}
