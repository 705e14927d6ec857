//! PostgreSQL implementation of TaskRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use task_core::{
    NewTask, PageRequest, RepoResult, Task, TaskChanges, TaskFilter, TaskId, TaskRepository,
    TaskStatus,
};

use crate::models::TaskModel;

use super::error::{map_db_error, task_not_found};

/// Escape LIKE metacharacters so the search term matches literally
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// PostgreSQL implementation of TaskRepository
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new PgTaskRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let result = sqlx::query_as::<_, TaskModel>(
            r"
            SELECT id, title, description, status, user_id, created_at, updated_at
            FROM tasks
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Task::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: &TaskFilter, page: PageRequest) -> RepoResult<Vec<Task>> {
        let models = sqlx::query_as::<_, TaskModel>(
            r"
            SELECT id, title, description, status, user_id, created_at, updated_at
            FROM tasks
            WHERE user_id = $1
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR title ILIKE $3)
            ORDER BY created_at DESC, id DESC
            LIMIT $4 OFFSET $5
            ",
        )
        .bind(filter.user_id)
        .bind(filter.status.as_ref().map(TaskStatus::as_str))
        .bind(filter.search.as_deref().map(like_pattern))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        models.into_iter().map(Task::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &TaskFilter) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM tasks
            WHERE user_id = $1
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR title ILIKE $3)
            ",
        )
        .bind(filter.user_id)
        .bind(filter.status.as_ref().map(TaskStatus::as_str))
        .bind(filter.search.as_deref().map(like_pattern))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn create(&self, task: &NewTask) -> RepoResult<Task> {
        let model = sqlx::query_as::<_, TaskModel>(
            r"
            INSERT INTO tasks (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, status, user_id, created_at, updated_at
            ",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Task::try_from(model)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: TaskId, changes: &TaskChanges) -> RepoResult<Task> {
        let model = sqlx::query_as::<_, TaskModel>(
            r"
            UPDATE tasks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, user_id, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.status.as_ref().map(TaskStatus::as_str))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        model
            .map(Task::try_from)
            .transpose()?
            .ok_or_else(|| task_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: TaskId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM tasks WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(task_not_found(id));
        }

        Ok(())
    }
}
