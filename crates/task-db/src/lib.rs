//! # task-db
//!
//! Persistence layer implementing the `task-core` repository traits.
//!
//! ## Overview
//!
//! - PostgreSQL repositories via SQLx, with a schema bootstrap
//! - Database models with SQLx `FromRow` derives and model → entity mappers
//! - In-memory repositories backed by `DashMap`, used when no database is
//!   configured and in tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use task_common::DatabaseConfig;
//! use task_db::{create_pool, run_migrations, PgUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new("postgres://localhost/tasks")).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemoryTaskRepository, MemoryUserRepository};
pub use pool::{check_connection, create_pool, run_migrations, PgPool};
pub use repositories::{PgTaskRepository, PgUserRepository};
