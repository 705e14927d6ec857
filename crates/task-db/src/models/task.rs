//! Task database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the tasks table
#[derive(Debug, Clone, FromRow)]
pub struct TaskModel {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    /// `OPEN` or `DONE`
    pub status: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
