//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in task-core.

mod error;
mod task;
mod user;

pub use task::PgTaskRepository;
pub use user::PgUserRepository;
