//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs (camelCase)
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    first_validation_message, CreateTaskRequest, LoginRequest, RegisterRequest, TaskListParams,
    TaskListQuery, UpdateTaskRequest,
};
pub use responses::{
    AccessTokenResponse, HealthChecks, HealthResponse, OkResponse, ReadinessResponse,
    RootResponse, TaskListResponse, TaskResponse,
};
