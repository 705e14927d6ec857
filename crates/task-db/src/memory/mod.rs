//! In-memory repositories
//!
//! `DashMap`-backed implementations of the repository traits. They share the
//! semantics of the PostgreSQL repositories (unique emails, sequential ids,
//! newest-first listing) and are used when no database is configured.

mod task;
mod user;

pub use task::MemoryTaskRepository;
pub use user::MemoryUserRepository;
