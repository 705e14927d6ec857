//! # task-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! The heart of the crate is [`services::TokenService`]: it issues access and
//! refresh tokens, keeps exactly one refresh token per user in the store, and
//! rotates or revokes it on demand.

pub mod dto;
pub mod services;

pub use dto::{
    first_validation_message, AccessTokenResponse, CreateTaskRequest, HealthChecks,
    HealthResponse, LoginRequest, OkResponse, ReadinessResponse, RegisterRequest, RootResponse,
    TaskListParams, TaskListQuery, TaskListResponse, TaskResponse, UpdateTaskRequest,
};
pub use services::{
    AuthService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, TaskService,
    TokenService,
};
