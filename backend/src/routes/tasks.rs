//! Task routes
//!
//! Every route is scoped to `/:user_id/tasks` and requires the bearer token
//! issued to that user.

use super::json::AppJson;
use crate::auth::TaskOwner;
use crate::error::{ApiError, ApiResult};
use crate::services::TaskService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use tasklist_shared::validation::is_valid_task_id;
use tasklist_shared::{
    CreateResponse, DeleteResponse, NewTask, TaskBuckets, TaskUpdate, UpdateResponse,
};

/// Create task routes
pub fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/:user_id/tasks", get(list_tasks).post(create_task))
        .route("/:user_id/tasks/:task_id", patch(update_task).delete(delete_task))
}

fn checked_task_id(task_id: String) -> ApiResult<String> {
    if is_valid_task_id(&task_id) {
        Ok(task_id)
    } else {
        Err(ApiError::NotFound("Unknown task path".to_string()))
    }
}

/// GET /api/v1/:user_id/tasks - Tasks grouped by priority
async fn list_tasks(
    State(state): State<AppState>,
    owner: TaskOwner,
) -> ApiResult<Json<TaskBuckets>> {
    let buckets = TaskService::list(state.tasks(), &owner.user_id).await?;
    Ok(Json(buckets))
}

/// POST /api/v1/:user_id/tasks - Create a task
async fn create_task(
    State(state): State<AppState>,
    owner: TaskOwner,
    AppJson(new_task): AppJson<NewTask>,
) -> ApiResult<Json<CreateResponse>> {
    let ack = TaskService::create(state.tasks(), &owner.user_id, new_task).await?;
    Ok(Json(ack))
}

/// PATCH /api/v1/:user_id/tasks/:task_id - Partially update a task
async fn update_task(
    State(state): State<AppState>,
    owner: TaskOwner,
    Path((_, task_id)): Path<(String, String)>,
    AppJson(changes): AppJson<TaskUpdate>,
) -> ApiResult<Json<UpdateResponse>> {
    let task_id = checked_task_id(task_id)?;
    let ack = TaskService::update(state.tasks(), &owner.user_id, &task_id, changes).await?;
    Ok(Json(ack))
}

/// DELETE /api/v1/:user_id/tasks/:task_id - Delete a task
async fn delete_task(
    State(state): State<AppState>,
    owner: TaskOwner,
    Path((_, task_id)): Path<(String, String)>,
) -> ApiResult<Json<DeleteResponse>> {
    let task_id = checked_task_id(task_id)?;
    let ack = TaskService::delete(state.tasks(), &owner.user_id, &task_id).await?;
    Ok(Json(ack))
}
