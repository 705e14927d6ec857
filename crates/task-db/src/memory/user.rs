//! In-memory implementation of UserRepository

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{mapref::entry::Entry, DashMap};

use task_core::{DomainError, RepoResult, User, UserId, UserRepository};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: String,
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: DashMap<UserId, StoredUser>,
    /// email -> id; the entry lock makes the uniqueness check atomic
    emails: DashMap<String, UserId>,
    last_id: AtomicI64,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        Ok(self.users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let Some(id) = self.emails.get(email).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn create(&self, email: &str, password_hash: &str) -> RepoResult<User> {
        match self.emails.entry(email.to_string()) {
            Entry::Occupied(_) => Err(DomainError::EmailAlreadyExists),
            Entry::Vacant(slot) => {
                let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
                let user = User::new(id, email.to_string());

                self.users.insert(
                    id,
                    StoredUser {
                        user: user.clone(),
                        password_hash: password_hash.to_string(),
                    },
                );
                slot.insert(id);

                Ok(user)
            }
        }
    }

    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
        Ok(self
            .users
            .get(&id)
            .map(|stored| stored.password_hash.clone()))
    }

    async fn update_refresh_token(&self, id: UserId, token: Option<&str>) -> RepoResult<User> {
        let mut stored = self
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;

        stored.user.refresh_token = token.map(str::to_string);
        stored.user.updated_at = Utc::now();

        Ok(stored.user.clone())
    }
}
