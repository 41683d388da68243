//! Data models for the task list application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Bucket used for tasks stored without a priority
pub const DEFAULT_PRIORITY: i32 = 0;

/// Tasks grouped by priority, ascending. Order inside a bucket is creation order.
pub type TaskBuckets = BTreeMap<i32, Vec<TaskItem>>;

/// Generate an opaque identifier (v4 UUID as 32 lowercase hex digits)
pub fn new_identifier() -> String {
    Uuid::new_v4().simple().to_string()
}

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// Bearer token issued to a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub user_id: String,
    pub expiry: DateTime<Utc>,
}

impl AccessToken {
    /// Whether the token is past its expiry at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry
    }
}

/// A single task owned by one user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskItem {
    pub priority: Option<i32>,
    pub task: Option<String>,
    pub user_id: String,
    pub task_id: String,
}

impl TaskItem {
    /// Priority bucket this task is listed under
    #[inline]
    pub fn bucket(&self) -> i32 {
        self.priority.unwrap_or(DEFAULT_PRIORITY)
    }
}

/// Group tasks by priority, keeping the incoming order within each bucket
pub fn bucket_by_priority<I>(items: I) -> TaskBuckets
where
    I: IntoIterator<Item = TaskItem>,
{
    let mut buckets = TaskBuckets::new();
    for item in items {
        buckets.entry(item.bucket()).or_default().push(item);
    }
    buckets
}
