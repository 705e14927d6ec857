//! Task model -> entity mapper

use task_core::{DomainError, Task};

use crate::models::TaskModel;

impl TryFrom<TaskModel> for Task {
    type Error = DomainError;

    fn try_from(model: TaskModel) -> Result<Self, Self::Error> {
        let status = model
            .status
            .parse()
            .map_err(|e| DomainError::DatabaseError(format!("task {}: {e}", model.id)))?;

        Ok(Task {
            id: model.id,
            title: model.title,
            description: model.description,
            status,
            user_id: model.user_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
