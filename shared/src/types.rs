//! API request and response types

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 4, message = "Username must have at least 4 characters"))]
    pub username: String,
    #[validate(length(min = 8, message = "Password must have at least 8 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /{user_id}/tasks`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTask {
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub task: Option<String>,
}

/// Partial patch applied by `PATCH /{user_id}/tasks/{task_id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

impl TaskUpdate {
    /// True when the patch carries no field to apply
    pub fn is_empty(&self) -> bool {
        self.priority.is_none() && self.task.is_none()
    }
}

/// Acknowledgment for a created task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateResponse {
    pub success: bool,
    pub task_id: String,
}

/// Acknowledgment for a task update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateResponse {
    pub success: bool,
    pub updated: u64,
}

/// Acknowledgment for a task deletion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub success: bool,
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_update_empty_patch() {
        let patch: TaskUpdate = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_task_update_with_single_field() {
        let patch: TaskUpdate = serde_json::from_str(r#"{"priority": 3}"#).unwrap();
        assert!(!patch.is_empty());
        assert_eq!(patch.priority, Some(3));
        assert_eq!(patch.task, None);
    }

    #[test]
    fn test_new_task_accepts_empty_body_object() {
        let task: NewTask = serde_json::from_str("{}").unwrap();
        assert_eq!(task, NewTask::default());
    }

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            username: "alice".to_string(),
            password: "longenough".to_string(),
        };
        assert!(ok.validate().is_ok());

        let short = RegisterRequest {
            username: "al".to_string(),
            password: "longenough".to_string(),
        };
        assert!(short.validate().is_err());
    }
}
