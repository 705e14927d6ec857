//! Domain entities - core business objects

mod task;
mod user;

pub use task::{Task, TaskId};
pub use user::{User, UserId};
