//! Task listing extractor
//!
//! Parses `?page&limit&status&search` for `GET /tasks`. Numbers are read
//! leniently, so the raw values are taken as strings first.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use task_service::{TaskListParams, TaskListQuery};

use crate::response::ApiError;

/// Parsed listing query
#[derive(Debug, Clone)]
pub struct TaskListing(pub TaskListQuery);

#[async_trait]
impl<S> FromRequestParts<S> for TaskListing
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<TaskListParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(TaskListing(params.parse()?))
    }
}
