//! Model to entity mappers
//!
//! - `From<UserModel> for User`
//! - `TryFrom<TaskModel> for Task` (the status column is free text)

mod task;
mod user;
