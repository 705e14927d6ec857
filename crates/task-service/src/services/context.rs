//! Service context - dependency container for services
//!
//! Holds the repositories, the JWT service and the password hasher.

use std::sync::Arc;

use task_common::{Argon2Hasher, JwtService, PasswordHasher};
use task_core::{TaskRepository, UserRepository};
use task_db::{MemoryTaskRepository, MemoryUserRepository, PgPool};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool; `None` when running on the in-memory store
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    task_repo: Arc<dyn TaskRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        pool: Option<PgPool>,
        user_repo: Arc<dyn UserRepository>,
        task_repo: Arc<dyn TaskRepository>,
        jwt_service: Arc<JwtService>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            pool,
            user_repo,
            task_repo,
            jwt_service,
            password_hasher,
        }
    }

    /// Context backed by fresh in-memory repositories and Argon2 hashing
    pub fn in_memory(jwt_service: JwtService) -> Self {
        Self::new(
            None,
            Arc::new(MemoryUserRepository::new()),
            Arc::new(MemoryTaskRepository::new()),
            Arc::new(jwt_service),
            Arc::new(Argon2Hasher::new()),
        )
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool, if one is configured
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the task repository
    pub fn task_repo(&self) -> &dyn TaskRepository {
        self.task_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get a shared handle to the password hasher (for `spawn_blocking`)
    pub fn password_hasher(&self) -> Arc<dyn PasswordHasher> {
        Arc::clone(&self.password_hasher)
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    task_repo: Option<Arc<dyn TaskRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    password_hasher: Option<Arc<dyn PasswordHasher>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn task_repo(mut self, repo: Arc<dyn TaskRepository>) -> Self {
        self.task_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Override the password hasher (defaults to Argon2id)
    pub fn password_hasher(mut self, hasher: Arc<dyn PasswordHasher>) -> Self {
        self.password_hasher = Some(hasher);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.task_repo
                .ok_or_else(|| ServiceError::validation("task_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.password_hasher
                .unwrap_or_else(|| Arc::new(Argon2Hasher::new())),
        ))
    }
}
