//! Task service
//!
//! Thin layer over `TaskRepository` that rejects empty patches and logs
//! mutations. The caller has already authenticated `user_id`.

use crate::error::ApiError;
use crate::repositories::TaskRepository;
use tasklist_shared::{
    CreateResponse, DeleteResponse, NewTask, TaskBuckets, TaskUpdate, UpdateResponse,
};
use tracing::debug;

pub struct TaskService;

impl TaskService {
    pub async fn list(tasks: &TaskRepository, user_id: &str) -> Result<TaskBuckets, ApiError> {
        Ok(tasks.read_by_user_id(user_id).await?)
    }

    pub async fn create(
        tasks: &TaskRepository,
        user_id: &str,
        new_task: NewTask,
    ) -> Result<CreateResponse, ApiError> {
        let ack = tasks.create(user_id, new_task).await?;
        debug!(user_id, task_id = %ack.task_id, "Task created");
        Ok(ack)
    }

    /// Apply a partial update; a patch with no fields is a validation error
    pub async fn update(
        tasks: &TaskRepository,
        user_id: &str,
        task_id: &str,
        patch: TaskUpdate,
    ) -> Result<UpdateResponse, ApiError> {
        if patch.is_empty() {
            return Err(ApiError::Validation(
                "No update fields provided in request".to_string(),
            ));
        }

        let ack = tasks.update(user_id, task_id, &patch).await?;
        debug!(user_id, task_id, updated = ack.updated, "Task updated");
        Ok(ack)
    }

    pub async fn delete(
        tasks: &TaskRepository,
        user_id: &str,
        task_id: &str,
    ) -> Result<DeleteResponse, ApiError> {
        let ack = tasks.delete(user_id, task_id).await?;
        debug!(user_id, task_id, deleted = ack.deleted, "Task deleted");
        Ok(ack)
    }
}
