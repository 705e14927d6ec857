//! Task entity - a unit of work owned by a single user

use chrono::{DateTime, Utc};

use super::user::UserId;
use crate::value_objects::TaskStatus;

/// Numeric task identifier assigned by the store
pub type TaskId = i64;

/// Task entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new open task
    pub fn new(id: TaskId, user_id: UserId, title: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description,
            status: TaskStatus::Open,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the task belongs to the given user
    #[inline]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Case-insensitive title substring match
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}
