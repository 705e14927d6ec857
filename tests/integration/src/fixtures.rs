//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use serde::Serialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Default password used by fixtures
pub const PASSWORD: &str = "secret1";

/// Registration / login body
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn unique() -> Self {
        Self {
            email: format!("user{}@example.com", unique_suffix()),
            password: PASSWORD.to_string(),
        }
    }

    pub fn with_password(&self, password: &str) -> Self {
        Self {
            email: self.email.clone(),
            password: password.to_string(),
        }
    }
}

/// `POST /tasks` body
pub fn task_body(title: &str) -> Value {
    json!({ "title": title })
}

/// `POST /tasks` body with description
pub fn task_body_with_description(title: &str, description: &str) -> Value {
    json!({ "title": title, "description": description })
}
