//! PostgreSQL store
//!
//! Tables are created by the migrations in `backend/migrations`.

use super::{RepoResult, RepositoryError, TaskStore, TokenStore, UserStore};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tasklist_shared::{AccessToken, TaskItem, TaskUpdate, User};

/// User row from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct UserRow {
    user_id: String,
    username: String,
    password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            user_id: row.user_id,
            username: row.username,
            password_hash: row.password_hash,
        }
    }
}

/// Task row from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct TaskRow {
    task_id: String,
    user_id: String,
    priority: Option<i32>,
    task: Option<String>,
}

impl From<TaskRow> for TaskItem {
    fn from(row: TaskRow) -> Self {
        Self {
            priority: row.priority,
            task: row.task,
            user_id: row.user_id,
            task_id: row.task_id,
        }
    }
}

/// Token row from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct TokenRow {
    user_id: String,
    token: String,
    expiry: DateTime<Utc>,
}

impl From<TokenRow> for AccessToken {
    fn from(row: TokenRow) -> Self {
        Self {
            token: row.token,
            user_id: row.user_id,
            expiry: row.expiry,
        }
    }
}

/// Store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, username, password_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&user.user_id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                RepositoryError::Duplicate(format!("username {}", user.username))
            }
            other => other.into(),
        })?;

        Ok(())
    }

    async fn find_user_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn insert_task(&self, task: &TaskItem) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (task_id, user_id, priority, task)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&task.task_id)
        .bind(&task.user_id)
        .bind(task.priority)
        .bind(task.task.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn tasks_for_user(&self, user_id: &str) -> RepoResult<Vec<TaskItem>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT task_id, user_id, priority, task
            FROM tasks
            WHERE user_id = $1
            ORDER BY seq
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaskItem::from).collect())
    }

    async fn update_task(&self, user_id: &str, task_id: &str, patch: &TaskUpdate) -> RepoResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE tasks SET
                priority = COALESCE($3, priority),
                task = COALESCE($4, task),
                updated_at = NOW()
            WHERE user_id = $1 AND task_id = $2
            "#,
        )
        .bind(user_id)
        .bind(task_id)
        .bind(patch.priority)
        .bind(patch.task.as_deref())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete_task(&self, user_id: &str, task_id: &str) -> RepoResult<u64> {
        let result = sqlx::query(r#"DELETE FROM tasks WHERE user_id = $1 AND task_id = $2"#)
            .bind(user_id)
            .bind(task_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TokenStore for PgStore {
    async fn upsert_token(&self, token: &AccessToken) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tokens (user_id, token, expiry)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET
                token = EXCLUDED.token,
                expiry = EXCLUDED.expiry,
                updated_at = NOW()
            "#,
        )
        .bind(&token.user_id)
        .bind(&token.token)
        .bind(token.expiry)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn token_for_user(&self, user_id: &str) -> RepoResult<Option<AccessToken>> {
        let row = sqlx::query_as::<_, TokenRow>(
            r#"
            SELECT user_id, token, expiry
            FROM tokens
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccessToken::from))
    }
}
