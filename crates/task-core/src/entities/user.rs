//! User entity - an account that owns tasks

use chrono::{DateTime, Utc};

/// Numeric user identifier assigned by the store
pub type UserId = i64;

/// User entity
///
/// The password hash is intentionally not part of the entity; repositories
/// expose it through a dedicated lookup used only by the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    /// Last refresh token issued to this user, `None` after logout
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with no active refresh token
    pub fn new(id: UserId, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether `token` is exactly the refresh token currently stored
    pub fn holds_refresh_token(&self, token: &str) -> bool {
        self.refresh_token.as_deref() == Some(token)
    }

    /// Check if the user currently has an active refresh token
    #[inline]
    pub fn is_logged_in(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// Replace the stored refresh token
    pub fn set_refresh_token(&mut self, token: Option<String>) {
        self.refresh_token = token;
        self.updated_at = Utc::now();
    }
}
