//! Task service
//!
//! CRUD and listing for the authenticated user's tasks. A task owned by
//! someone else is reported exactly like a missing one.

use task_core::{DomainError, NewTask, Task, TaskChanges, TaskFilter, TaskId, UserId};
use tracing::{info, instrument};

use crate::dto::{
    CreateTaskRequest, TaskListQuery, TaskListResponse, TaskResponse, UpdateTaskRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Task service
pub struct TaskService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TaskService<'a> {
    /// Create a new TaskService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List one page of the user's tasks, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: UserId,
        query: TaskListQuery,
    ) -> ServiceResult<TaskListResponse> {
        let filter = TaskFilter {
            user_id,
            status: query.status,
            search: query.search,
        };
        let page = query.page;
        let repo = self.ctx.task_repo();

        let (tasks, total) = tokio::try_join!(repo.list(&filter, page), repo.count(&filter))?;

        Ok(TaskListResponse {
            data: tasks.into_iter().map(TaskResponse::from).collect(),
            total,
            page: page.page(),
            limit: page.limit(),
            total_pages: page.total_pages(total),
        })
    }

    /// Create a task with status OPEN
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: UserId,
        request: CreateTaskRequest,
    ) -> ServiceResult<TaskResponse> {
        let task = self
            .ctx
            .task_repo()
            .create(&NewTask {
                user_id,
                title: request.title,
                description: request.description,
            })
            .await?;

        info!(task_id = task.id, "Task created");
        Ok(task.into())
    }

    /// Get one of the user's tasks
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: UserId, task_id: TaskId) -> ServiceResult<TaskResponse> {
        Ok(self.find_owned(user_id, task_id).await?.into())
    }

    /// Apply a partial update
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: UserId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> ServiceResult<TaskResponse> {
        self.find_owned(user_id, task_id).await?;

        let changes = TaskChanges {
            title: request.title,
            description: request.description,
            status: request.status,
        };
        self.apply(task_id, &changes).await
    }

    /// Delete one of the user's tasks
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: UserId, task_id: TaskId) -> ServiceResult<()> {
        self.find_owned(user_id, task_id).await?;

        self.ctx
            .task_repo()
            .delete(task_id)
            .await
            .map_err(|e| not_found_or(e, task_id))?;

        info!(task_id, "Task deleted");
        Ok(())
    }

    /// Flip the status between OPEN and DONE
    #[instrument(skip(self))]
    pub async fn toggle(&self, user_id: UserId, task_id: TaskId) -> ServiceResult<TaskResponse> {
        let task = self.find_owned(user_id, task_id).await?;

        let changes = TaskChanges {
            status: Some(task.status.toggled()),
            ..Default::default()
        };
        self.apply(task_id, &changes).await
    }

    async fn find_owned(&self, user_id: UserId, task_id: TaskId) -> ServiceResult<Task> {
        self.ctx
            .task_repo()
            .find_by_id(task_id)
            .await?
            .filter(|task| task.is_owned_by(user_id))
            .ok_or_else(|| ServiceError::not_found("Task", task_id))
    }

    async fn apply(&self, task_id: TaskId, changes: &TaskChanges) -> ServiceResult<TaskResponse> {
        let task = self
            .ctx
            .task_repo()
            .update(task_id, changes)
            .await
            .map_err(|e| not_found_or(e, task_id))?;
        Ok(task.into())
    }
}

/// A task deleted between lookup and write is reported as not found
fn not_found_or(err: DomainError, task_id: TaskId) -> ServiceError {
    if err.is_not_found() {
        ServiceError::not_found("Task", task_id)
    } else {
        err.into()
    }
}
