//! Task handlers
//!
//! Every endpoint requires a bearer access token and only ever touches the
//! caller's own tasks.

use axum::{extract::State, Json};
use task_service::{
    CreateTaskRequest, OkResponse, TaskListResponse, TaskResponse, TaskService, UpdateTaskRequest,
};

use crate::extractors::{AuthUser, TaskIdPath, TaskListing, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List the caller's tasks
///
/// GET /tasks?page&limit&status&search
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    TaskListing(query): TaskListing,
) -> ApiResult<Json<TaskListResponse>> {
    let service = TaskService::new(state.service_context());
    let page = service.list(auth.user_id, query).await?;
    Ok(Json(page))
}

/// Create a task
///
/// POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<Created<Json<TaskResponse>>> {
    let service = TaskService::new(state.service_context());
    let task = service.create(auth.user_id, request).await?;
    Ok(Created(Json(task)))
}

/// Get a single task
///
/// GET /tasks/:id
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    TaskIdPath(task_id): TaskIdPath,
) -> ApiResult<Json<TaskResponse>> {
    let service = TaskService::new(state.service_context());
    let task = service.get(auth.user_id, task_id).await?;
    Ok(Json(task))
}

/// Partially update a task
///
/// PATCH /tasks/:id
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    TaskIdPath(task_id): TaskIdPath,
    ValidatedJson(request): ValidatedJson<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let service = TaskService::new(state.service_context());
    let task = service.update(auth.user_id, task_id, request).await?;
    Ok(Json(task))
}

/// Delete a task
///
/// DELETE /tasks/:id
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    TaskIdPath(task_id): TaskIdPath,
) -> ApiResult<Json<OkResponse>> {
    let service = TaskService::new(state.service_context());
    service.delete(auth.user_id, task_id).await?;
    Ok(Json(OkResponse::ok()))
}

/// Flip a task between OPEN and DONE
///
/// POST /tasks/:id/toggle
pub async fn toggle_task(
    State(state): State<AppState>,
    auth: AuthUser,
    TaskIdPath(task_id): TaskIdPath,
) -> ApiResult<Json<TaskResponse>> {
    let service = TaskService::new(state.service_context());
    let task = service.toggle(auth.user_id, task_id).await?;
    Ok(Json(task))
}
