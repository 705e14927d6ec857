//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation (PostgreSQL or in-memory).

use async_trait::async_trait;

use crate::entities::{Task, TaskId, User, UserId};
use crate::error::DomainError;
use crate::value_objects::{PageRequest, TaskStatus};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Create a new user
    ///
    /// Fails with `DomainError::EmailAlreadyExists` if the email is taken.
    async fn create(&self, email: &str, password_hash: &str) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Overwrite (or clear, with `None`) the stored refresh token
    ///
    /// Fails with `DomainError::UserNotFound` if the user does not exist.
    async fn update_refresh_token(&self, id: UserId, token: Option<&str>) -> RepoResult<User>;
}

// ============================================================================
// Task Repository
// ============================================================================

/// Filter for task listing; always scoped to one owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFilter {
    pub user_id: UserId,
    pub status: Option<TaskStatus>,
    /// Case-insensitive substring of the title
    pub search: Option<String>,
}

impl TaskFilter {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            status: None,
            search: None,
        }
    }

    /// Check whether a task passes this filter
    pub fn matches(&self, task: &Task) -> bool {
        task.is_owned_by(self.user_id)
            && self.status.is_none_or(|status| task.status == status)
            && self
                .search
                .as_deref()
                .is_none_or(|needle| task.title_contains(needle))
    }
}

/// Data for a task insert
#[derive(Debug, Clone)]
pub struct NewTask {
    pub user_id: UserId,
    pub title: String,
    pub description: Option<String>,
}

/// Partial update; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskChanges {
    /// Check if the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Find task by ID (regardless of owner)
    async fn find_by_id(&self, id: TaskId) -> RepoResult<Option<Task>>;

    /// List one page of tasks, newest first
    async fn list(&self, filter: &TaskFilter, page: PageRequest) -> RepoResult<Vec<Task>>;

    /// Count all tasks matching the filter
    async fn count(&self, filter: &TaskFilter) -> RepoResult<i64>;

    /// Create a new task with status OPEN
    async fn create(&self, task: &NewTask) -> RepoResult<Task>;

    /// Apply a partial update
    async fn update(&self, id: TaskId, changes: &TaskChanges) -> RepoResult<Task>;

    /// Delete a task
    async fn delete(&self, id: TaskId) -> RepoResult<()>;
}
