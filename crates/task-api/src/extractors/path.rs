//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use task_core::TaskId;

use crate::response::ApiError;

/// Numeric `:id` path segment of `/tasks/:id`
#[derive(Debug, Clone, Copy)]
pub struct TaskIdPath(pub TaskId);

#[async_trait]
impl<S> FromRequestParts<S> for TaskIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        raw.parse::<TaskId>()
            .map(TaskIdPath)
            .map_err(|_| ApiError::invalid_path("Invalid task id format"))
    }
}
