//! Business logic services
//!
//! Services borrow a [`ServiceContext`] for the duration of one request and
//! orchestrate repositories, token signing and password hashing.

pub mod auth;
pub mod context;
pub mod error;
pub mod task;
pub mod token;

// Re-export all services for convenience
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use task::TaskService;
pub use token::TokenService;
