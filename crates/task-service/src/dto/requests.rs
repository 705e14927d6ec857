//! Request DTOs for API endpoints
//!
//! Body DTOs implement `Deserialize` and `Validate`. Missing string fields
//! default to empty so that they fail validation with a readable message
//! instead of a deserialization error.

use serde::Deserialize;
use task_core::{PageRequest, TaskStatus};
use validator::{Validate, ValidationErrors};

use crate::services::{ServiceError, ServiceResult};

/// First human-readable message from a set of validation errors
///
/// Fields are visited in name order so the result is deterministic.
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|err| err.message.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| "Invalid request".to_string())
}

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Task Requests
// ============================================================================

/// Create task request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    pub description: Option<String>,
}

/// Partial task update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub status: Option<TaskStatus>,
}

/// Raw `GET /tasks` query string, exactly as received
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Parsed task listing query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    pub page: PageRequest,
    pub status: Option<TaskStatus>,
    pub search: Option<String>,
}

impl TaskListParams {
    /// Parse the raw query
    ///
    /// Unparsable page/limit fall back to the defaults and out-of-range values
    /// are clamped. Empty `status`/`search` mean no filter.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` for an unknown status
    pub fn parse(self) -> ServiceResult<TaskListQuery> {
        let defaults = PageRequest::default();
        let number = |raw: Option<&str>, default: i64| {
            raw.and_then(|s| s.trim().parse::<i64>().ok())
                .unwrap_or(default)
        };

        let page = PageRequest::new(
            number(self.page.as_deref(), defaults.page()),
            number(self.limit.as_deref(), defaults.limit()),
        );

        let status = match self.status.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse::<TaskStatus>()
                    .map_err(|e| ServiceError::validation(e.to_string()))?,
            ),
        };

        let search = self.search.filter(|s| !s.is_empty());

        Ok(TaskListQuery {
            page,
            status,
            search,
        })
    }
}
