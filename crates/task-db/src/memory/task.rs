//! In-memory implementation of TaskRepository

use std::cmp::Reverse;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use task_core::{
    DomainError, NewTask, PageRequest, RepoResult, Task, TaskChanges, TaskFilter, TaskId,
    TaskRepository,
};

/// In-memory implementation of TaskRepository
#[derive(Debug, Default)]
pub struct MemoryTaskRepository {
    tasks: DashMap<TaskId, Task>,
    last_id: AtomicI64,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matching(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> RepoResult<Option<Task>> {
        Ok(self.tasks.get(&id).map(|task| task.clone()))
    }

    async fn list(&self, filter: &TaskFilter, page: PageRequest) -> RepoResult<Vec<Task>> {
        let mut tasks = self.matching(filter);
        tasks.sort_by_key(|task| Reverse((task.created_at, task.id)));

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        Ok(tasks.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self, filter: &TaskFilter) -> RepoResult<i64> {
        let count = self
            .tasks
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .count();
        Ok(count as i64)
    }

    async fn create(&self, new_task: &NewTask) -> RepoResult<Task> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let task = Task::new(
            id,
            new_task.user_id,
            new_task.title.clone(),
            new_task.description.clone(),
        );

        self.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, changes: &TaskChanges) -> RepoResult<Task> {
        let mut task = self
            .tasks
            .get_mut(&id)
            .ok_or(DomainError::TaskNotFound(id))?;

        if let Some(title) = &changes.title {
            task.title.clone_from(title);
        }
        if let Some(description) = &changes.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        task.updated_at = Utc::now();

        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> RepoResult<()> {
        self.tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::TaskNotFound(id))
    }
}
