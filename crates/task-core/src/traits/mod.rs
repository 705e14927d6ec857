//! Ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    NewTask, RepoResult, TaskChanges, TaskFilter, TaskRepository, UserRepository,
};
