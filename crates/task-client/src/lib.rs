//! # task-client
//!
//! Typed client for the task API.
//!
//! The access token lives in an explicit [`TokenHolder`] shared by every
//! clone of the client; the refresh token never leaves the client's cookie
//! store. Task calls that come back 401 refresh the access token once and
//! retry once.

pub mod client;
pub mod error;
pub mod models;
pub mod token_holder;

pub use client::ApiClient;
pub use error::{ClientError, ClientResult};
pub use models::{AccessToken, CreateTask, ListTasks, Task, TaskList, TaskUpdate};
pub use token_holder::TokenHolder;
